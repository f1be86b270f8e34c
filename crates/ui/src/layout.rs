//! Layout composer: turns the active selection into positioned, fitted text.
//!
//! The badge is split into fixed bands:
//!
//! ```text
//! ┌──────────────────────────────┬──────────┐
//! │ company (white on black)     │          │
//! ├──────────────────────────────┤          │
//! │                              │  image   │
//! │        name (centred)        │  panel   │
//! │                              │          │
//! ├──────────────────────────────┤          │
//! │ title  value                 │          │
//! ├──────────────────────────────┤          │
//! │ title  value                 │          │
//! └──────────────────────────────┴──────────┘
//! ```
//!
//! Every frame is recomputed from scratch; there is no layout cache.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::{
    draw::{DrawCommand, DrawList, Pen},
    fit::{self, ScaleSearch},
    metrics::{FontFace, TextMetrics},
    profile::{BadgeProfile, DEFAULT_COMPANY_SCALE},
    selection::{BadgeSelection, Field},
};

/// Band sizes, paddings and scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutStyle {
    /// Width of the portrait panel on the right
    pub image_width: u32,
    /// Height of the company band
    pub company_height: u32,
    /// Height of each detail band
    pub detail_height: u32,
    /// Scale for detail titles and values
    pub detail_scale: f32,
    /// Company scale used for a blank frame
    pub company_scale: f32,
    /// Left inset of left-aligned text
    pub left_padding: u32,
    /// Horizontal slack kept around the name
    pub name_padding: u32,
    /// Gap between a detail title and its value
    pub detail_spacing: u32,
    /// Name scale search
    pub name_search: ScaleSearch,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            image_width: 104,
            company_height: 30,
            detail_height: 20,
            detail_scale: 0.5,
            company_scale: DEFAULT_COMPANY_SCALE,
            left_padding: 5,
            name_padding: 20,
            detail_spacing: 10,
            name_search: ScaleSearch::new(2.0, 0.01, 0.1),
        }
    }
}

/// Pixel rectangles and anchors for one display size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeGeometry {
    /// Whole display
    pub size: Size,
    /// Style the geometry was derived from
    pub style: LayoutStyle,
    /// Width shared by the text bands (left of the image panel)
    pub text_width: u32,
    /// Portrait panel
    pub image_panel: Rectangle,
    /// Left edge / vertical centre of the company text
    pub company_anchor: Point,
    /// White background behind the name
    pub name_band: Rectangle,
    /// Vertical centre of the name
    pub name_y: i32,
    /// White backgrounds behind the two detail lines
    pub detail_bands: [Rectangle; 2],
    /// Vertical centres of the two detail lines
    pub detail_y: [i32; 2],
}

fn px(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn upx(v: i32) -> u32 {
    u32::try_from(v).unwrap_or(0)
}

impl BadgeGeometry {
    /// Lay the bands out on a `width` × `height` display.
    ///
    /// Sizes that cannot hold the bands produce zero-sized rectangles rather
    /// than an error.
    pub fn for_display(width: u32, height: u32, style: LayoutStyle) -> Self {
        let image_width = style.image_width.min(width);
        let text_width = width.saturating_sub(image_width).saturating_sub(1);
        let name_height = height
            .saturating_sub(style.company_height)
            .saturating_sub(style.detail_height * 2)
            .saturating_sub(2);
        let (h, dh) = (px(height), px(style.detail_height));
        let detail_size = Size::new(text_width, style.detail_height.saturating_sub(1));

        Self {
            size: Size::new(width, height),
            style,
            text_width,
            image_panel: Rectangle::new(
                Point::new(px(width - image_width), 0),
                Size::new(image_width, height),
            ),
            company_anchor: Point::new(px(style.left_padding), px(style.company_height / 2 + 1)),
            name_band: Rectangle::new(
                Point::new(1, px(style.company_height + 1)),
                Size::new(text_width, name_height),
            ),
            name_y: px(name_height / 2 + style.company_height + 1),
            detail_bands: [
                Rectangle::new(Point::new(1, h - 2 * dh), detail_size),
                Rectangle::new(Point::new(1, h - dh), detail_size),
            ],
            detail_y: [h - dh * 3 / 2, h - dh / 2],
        }
    }

    /// Width budget for left-aligned text: from the left padding to the
    /// image panel's edge
    pub fn text_budget(&self) -> i32 {
        px(self.text_width) - px(self.style.left_padding)
    }

    /// Width budget for the name
    pub fn name_budget(&self) -> i32 {
        px(self.text_width) - px(self.style.name_padding)
    }

    /// The four lines framing the image panel
    pub fn border(&self) -> [(Point, Point); 4] {
        let left = self.image_panel.top_left.x;
        let right = px(self.size.width) - 1;
        let bottom = px(self.size.height) - 1;
        [
            (Point::new(left, 0), Point::new(right, 0)),
            (Point::new(left, 0), Point::new(left, bottom)),
            (Point::new(left, bottom), Point::new(right, bottom)),
            (Point::new(right, 0), Point::new(right, bottom)),
        ]
    }
}

/// One piece of text, fitted and positioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedText<'p> {
    /// What to draw (a prefix of the source)
    pub content: &'p str,
    /// Render scale
    pub scale: f32,
    /// Face
    pub font: FontFace,
    /// Left edge, vertical centre
    pub origin: Point,
    /// Clip width from `origin.x`
    pub max_width: u32,
    /// Measured width of `content`
    pub width: u32,
    /// Source was cut
    pub truncated: bool,
}

impl<'p> FittedText<'p> {
    fn blank(font: FontFace, scale: f32, origin: Point, max_width: u32) -> Self {
        Self {
            content: "",
            scale,
            font,
            origin,
            max_width,
            width: 0,
            truncated: false,
        }
    }

    fn command(&self) -> DrawCommand<'p> {
        DrawCommand::Text {
            content: self.content,
            origin: self.origin,
            max_width: self.max_width,
            scale: self.scale,
            font: self.font,
        }
    }
}

/// Title and value sharing one detail band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailLine<'p> {
    /// Label
    pub title: FittedText<'p>,
    /// Value after the label
    pub value: FittedText<'p>,
}

/// Everything needed to paint one badge frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeFrame<'p> {
    /// Geometry the frame was laid out on
    pub geometry: BadgeGeometry,
    /// Portrait image
    pub image_path: &'p str,
    /// Company band
    pub company: FittedText<'p>,
    /// Name band
    pub name: FittedText<'p>,
    /// Detail bands, top then bottom
    pub details: [DetailLine<'p>; 2],
}

impl<'p> BadgeFrame<'p> {
    /// Paint order: clear, image and border, company, name background and
    /// text, detail backgrounds and text, flush.
    pub fn commands(&self) -> DrawList<'p> {
        let g = &self.geometry;
        let mut list = DrawList::new();
        // Capacity covers the fixed command count; a failed push cannot happen.
        let mut push = |cmd| {
            list.push(cmd).ok();
        };

        push(DrawCommand::SetPen(Pen::BLACK));
        push(DrawCommand::Clear);

        push(DrawCommand::Image {
            path: self.image_path,
            origin: g.image_panel.top_left,
        });
        push(DrawCommand::SetPen(Pen::BLACK));
        for (from, to) in g.border() {
            push(DrawCommand::Line { from, to });
        }

        push(DrawCommand::SetPen(Pen::WHITE));
        push(self.company.command());

        push(DrawCommand::SetPen(Pen::WHITE));
        push(DrawCommand::Rectangle(g.name_band));
        push(DrawCommand::SetPen(Pen::BLACK));
        push(self.name.command());

        push(DrawCommand::SetPen(Pen::WHITE));
        for band in g.detail_bands {
            push(DrawCommand::Rectangle(band));
        }
        push(DrawCommand::SetPen(Pen::BLACK));
        for line in &self.details {
            push(line.title.command());
            push(line.value.command());
        }

        push(DrawCommand::Flush);
        list
    }
}

/// Why a frame could not be composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError<E> {
    /// The metrics provider failed
    Metrics(E),
    /// The selection points past the end of a field's options
    SelectionOutOfRange(Field),
}

impl<E: core::fmt::Display> core::fmt::Display for LayoutError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Metrics(e) => write!(f, "text measurement failed: {e}"),
            Self::SelectionOutOfRange(field) => {
                write!(f, "selected `{field}` option does not exist")
            }
        }
    }
}

/// Lays out frames for one display geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composer {
    geometry: BadgeGeometry,
}

impl Composer {
    /// Composer for a precomputed geometry
    pub const fn new(geometry: BadgeGeometry) -> Self {
        Self { geometry }
    }

    /// Composer for a `width` × `height` display with the default style
    pub fn for_display(width: u32, height: u32) -> Self {
        Self::new(BadgeGeometry::for_display(width, height, LayoutStyle::default()))
    }

    /// Geometry frames are laid out on
    pub const fn geometry(&self) -> &BadgeGeometry {
        &self.geometry
    }

    /// Fit every band for `selection`.
    ///
    /// Company text and detail titles are truncated to the text budget, each
    /// detail value to what its title leaves, and the name is scaled down
    /// until it fits, then centred.
    pub fn compose<'p, M>(
        &self,
        profile: &'p BadgeProfile,
        selection: BadgeSelection,
        metrics: &M,
    ) -> Result<BadgeFrame<'p>, LayoutError<M::Error>>
    where
        M: TextMetrics + ?Sized,
    {
        let g = &self.geometry;
        let style = &g.style;
        let budget = g.text_budget();
        let left = px(style.left_padding);

        let company = profile
            .company(selection.company())
            .ok_or(LayoutError::SelectionOutOfRange(Field::Company))?;
        let fitted = fit::truncate_to_width(
            metrics,
            &company.text,
            FontFace::Serif,
            company.size,
            budget,
        )
        .map_err(LayoutError::Metrics)?;
        let company = FittedText {
            content: fitted.content,
            scale: company.size,
            font: FontFace::Serif,
            origin: g.company_anchor,
            max_width: upx(budget),
            width: fitted.width,
            truncated: fitted.truncated,
        };

        let name = profile.name();
        let scale = fit::scale_to_width(
            metrics,
            name,
            FontFace::Sans,
            g.name_budget(),
            style.name_search,
        )
        .map_err(LayoutError::Metrics)?;
        let width = metrics
            .measure(name, FontFace::Sans, scale)
            .map_err(LayoutError::Metrics)?;
        let x = ((px(g.text_width) - px(width)) / 2).max(0);
        let name = FittedText {
            content: name,
            scale,
            font: FontFace::Sans,
            origin: Point::new(x, g.name_y),
            max_width: upx(px(g.text_width) - x),
            width,
            truncated: false,
        };

        let mut details = [DetailLine {
            title: FittedText::blank(FontFace::Sans, style.detail_scale, Point::zero(), 0),
            value: FittedText::blank(FontFace::Sans, style.detail_scale, Point::zero(), 0),
        }; 2];
        let fields = [
            (Field::Detail1, selection.detail1()),
            (Field::Detail2, selection.detail2()),
        ];
        for ((line, (field, index)), y) in details.iter_mut().zip(fields).zip(g.detail_y) {
            let detail = profile
                .detail(field, index)
                .ok_or(LayoutError::SelectionOutOfRange(field))?;
            let fit = fit::fit_title_value(
                metrics,
                &detail.title,
                &detail.text,
                FontFace::Sans,
                style.detail_scale,
                budget,
                px(style.detail_spacing),
            )
            .map_err(LayoutError::Metrics)?;

            line.title = FittedText {
                content: fit.title.content,
                scale: style.detail_scale,
                font: FontFace::Sans,
                origin: Point::new(left, y),
                max_width: upx(budget),
                width: fit.title.width,
                truncated: fit.title.truncated,
            };
            line.value = FittedText {
                content: fit.value.content,
                scale: style.detail_scale,
                font: FontFace::Sans,
                origin: Point::new(
                    left + px(fit.title.width) + px(style.detail_spacing),
                    y,
                ),
                max_width: upx(fit.value_budget),
                width: fit.value.width,
                truncated: fit.value.truncated,
            };
        }

        Ok(BadgeFrame {
            geometry: *g,
            image_path: profile.image_path(),
            company,
            name,
            details,
        })
    }

    /// Frame with the image and band backgrounds but no text. Used when the
    /// metrics provider cannot measure.
    pub fn compose_blank<'p>(&self, profile: &'p BadgeProfile) -> BadgeFrame<'p> {
        let g = &self.geometry;
        let style = &g.style;
        let left = px(style.left_padding);
        let budget = upx(g.text_budget());
        let detail = |y| DetailLine {
            title: FittedText::blank(FontFace::Sans, style.detail_scale, Point::new(left, y), budget),
            value: FittedText::blank(FontFace::Sans, style.detail_scale, Point::new(left, y), 0),
        };

        BadgeFrame {
            geometry: *g,
            image_path: profile.image_path(),
            company: FittedText::blank(FontFace::Serif, style.company_scale, g.company_anchor, budget),
            name: FittedText::blank(
                FontFace::Sans,
                style.name_search.min,
                Point::new(0, g.name_y),
                g.text_width,
            ),
            details: [detail(g.detail_y[0]), detail(g.detail_y[1])],
        }
    }
}
