//! SVG export of a rendered frame.

use crate::{
    core::geo::Point,
    rendering::context::{DrawCommand, RenderContext},
};
use std::fmt::Write as _;

/// Serializes the drawing queue of `context` into a standalone SVG document.
///
/// Drawing order is preserved, so the background image must be queued first.
pub fn render_svg(context: &RenderContext) -> String {
    let mut body = String::new();

    for command in context.get_drawing_queue() {
        match command {
            DrawCommand::Image {
                href,
                bounds,
                opacity,
            } => {
                let (min, max) = bounds;
                let _ = write!(
                    body,
                    "<image href=\"{href}\" xlink:href=\"{href}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\"",
                    fmt_f64(min.x),
                    fmt_f64(min.y),
                    fmt_f64(max.x - min.x),
                    fmt_f64(max.y - min.y),
                    href = escape(href),
                );
                if *opacity < 1.0 {
                    let _ = write!(body, " opacity=\"{}\"", fmt_f64(*opacity as f64));
                }
                body.push_str("/>");
            }
            DrawCommand::Point {
                position,
                style,
                label,
            } => {
                let _ = write!(
                    body,
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"",
                    fmt_f64(position.x),
                    fmt_f64(position.y),
                    fmt_f64(style.radius as f64),
                    style.fill_color.to_hex(),
                );
                if style.stroke_width > 0.0 {
                    let _ = write!(
                        body,
                        " stroke=\"{}\" stroke-width=\"{}\"",
                        style.stroke_color.to_hex(),
                        fmt_f64(style.stroke_width as f64)
                    );
                }
                if style.opacity < 1.0 {
                    let _ = write!(body, " opacity=\"{}\"", fmt_f64(style.opacity as f64));
                }
                match label {
                    Some(label) => {
                        let _ = write!(body, "><title>{}</title></circle>", escape(label));
                    }
                    None => body.push_str("/>"),
                }
            }
        }
    }

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = context.width,
        h = context.height,
    );
    if let Some((min, max)) = context.clip_bounds {
        write_clip(&mut svg, &min, &max);
        svg.push_str("<g clip-path=\"url(#viewport)\">");
        svg.push_str(&body);
        svg.push_str("</g>");
    } else {
        svg.push_str(&body);
    }
    svg.push_str("</svg>");
    svg
}

fn write_clip(svg: &mut String, min: &Point, max: &Point) {
    let _ = write!(
        svg,
        "<defs><clipPath id=\"viewport\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath></defs>",
        fmt_f64(min.x),
        fmt_f64(min.y),
        fmt_f64(max.x - min.x),
        fmt_f64(max.y - min.y),
    );
}

fn fmt_f64(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if (v - v.round()).abs() < 1e-6 {
        return format!("{}", v.round() as i64);
    }
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
