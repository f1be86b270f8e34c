//! Render sink: executes a [`DrawCommand`] list against a Gray4 target.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Gray4,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use ui::{DrawCommand, Pen};

use crate::{
    fonts,
    images::{ImageError, ImageSource},
};

/// Paint `commands` onto `target` in order.
///
/// Returns `true` when the list asked for a flush; pushing the framebuffer
/// to the glass is the caller's job. An image that cannot be found or
/// decoded leaves its panel at the cleared colour and drawing carries on.
pub fn draw_frame<D, S>(target: &mut D, commands: &[DrawCommand<'_>], images: &mut S) -> Result<bool, D::Error>
where
    D: DrawTarget<Color = Gray4>,
    S: ImageSource + ?Sized,
{
    let mut pen = Pen::BLACK;
    let mut flush = false;

    for command in commands {
        let color = Gray4::from(pen);
        match *command {
            DrawCommand::Clear => target.clear(color)?,
            DrawCommand::SetPen(next) => pen = next,
            DrawCommand::Image { path, origin } => match images.draw(path, origin, target) {
                Ok(()) => {}
                Err(ImageError::Draw(e)) => return Err(e),
                Err(ImageError::NotFound) => {
                    tracing::warn!(path, "badge image not found, panel left blank");
                }
                Err(ImageError::Decode) => {
                    tracing::warn!(path, "badge image could not be decoded, panel left blank");
                }
            },
            DrawCommand::Line { from, to } => {
                Line::new(from, to)
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(target)?;
            }
            DrawCommand::Rectangle(rect) => {
                rect.into_styled(PrimitiveStyle::with_fill(color)).draw(target)?;
            }
            DrawCommand::Text {
                content,
                origin,
                max_width,
                scale,
                font,
            } => {
                if content.is_empty() || max_width == 0 {
                    continue;
                }
                let style = MonoTextStyle::new(fonts::font_for(font, scale), color);
                let text = Text::with_baseline(content, origin, style, Baseline::Middle);
                let bounds = text.bounding_box();
                let clip = Rectangle::new(
                    Point::new(origin.x, bounds.top_left.y),
                    Size::new(max_width, bounds.size.height),
                );
                text.draw(&mut target.clipped(&clip))?;
            }
            DrawCommand::Flush => flush = true,
        }
    }

    Ok(flush)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{fonts::MonoLadder, images::StaticImages};
    use platform::mocks::MockDisplay;
    use ui::{BadgeMachine, BadgeProfile, Composer, FontFace};

    fn profile() -> BadgeProfile {
        BadgeProfile::builder()
            .name("Ada Lovelace")
            .company("Analytical Engines", 0.6)
            .detail1("Role", "Programmer")
            .detail2("Web", "example.org")
            .image_path("/badges/badge.jpg")
            .build()
            .unwrap()
    }

    #[test]
    fn test_flush_reported() {
        let mut display = MockDisplay::new(8, 8);
        let mut images = StaticImages::empty();
        let flushed = draw_frame(&mut display, &[DrawCommand::Clear, DrawCommand::Flush], &mut images);
        assert_eq!(flushed, Ok(true));
        let flushed = draw_frame(&mut display, &[DrawCommand::Clear], &mut images);
        assert_eq!(flushed, Ok(false));
    }

    #[test]
    fn test_pen_applies_to_following_shapes() {
        let mut display = MockDisplay::new(10, 10);
        let mut images = StaticImages::empty();
        let area = Rectangle::new(Point::new(2, 2), Size::new(3, 3));
        let commands = [
            DrawCommand::SetPen(Pen::WHITE),
            DrawCommand::Clear,
            DrawCommand::SetPen(Pen::BLACK),
            DrawCommand::Rectangle(area),
        ];
        draw_frame(&mut display, &commands, &mut images).unwrap();
        assert_eq!(display.count_in(area, Gray4::BLACK), 9);
        assert_eq!(display.pixel(Point::new(0, 0)), Some(Gray4::WHITE));
    }

    #[test]
    fn test_text_clipped_to_max_width() {
        let mut display = MockDisplay::new(100, 20);
        let mut images = StaticImages::empty();
        let commands = [
            DrawCommand::SetPen(Pen::WHITE),
            DrawCommand::Clear,
            DrawCommand::SetPen(Pen::BLACK),
            DrawCommand::Text {
                content: "MMMMMMMMMM",
                origin: Point::new(0, 10),
                max_width: 20,
                scale: 2.0,
                font: FontFace::Sans,
            },
        ];
        draw_frame(&mut display, &commands, &mut images).unwrap();
        let inside = Rectangle::new(Point::zero(), Size::new(20, 20));
        let outside = Rectangle::new(Point::new(20, 0), Size::new(80, 20));
        assert!(display.count_in(inside, Gray4::BLACK) > 0);
        assert_eq!(display.count_in(outside, Gray4::BLACK), 0);
    }

    #[test]
    fn test_missing_image_does_not_abort_frame() {
        let profile = profile();
        let machine = BadgeMachine::new(&profile);
        let composer = Composer::for_display(296, 128);
        let frame = composer
            .compose(&profile, machine.selection(), &MonoLadder)
            .unwrap();
        let mut display = MockDisplay::new(296, 128);
        let mut images = StaticImages::empty();

        let flushed = draw_frame(&mut display, &frame.commands(), &mut images).unwrap();
        assert!(flushed);

        // Name band is white behind black text
        let band = composer.geometry().name_band;
        assert!(display.count_in(band, Gray4::WHITE) > 0);
        assert!(display.count_in(band, Gray4::BLACK) > 0);
        // Image panel stays at the cleared colour
        let panel = composer.geometry().image_panel;
        let inner = Rectangle::new(panel.top_left + Point::new(2, 2), Size::new(90, 90));
        assert_eq!(display.count_in(inner, Gray4::WHITE), 0);
    }
}
