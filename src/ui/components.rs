//! egui widgets for the map canvas, the table and the legend

use crate::{
    core::geo::Point,
    rendering::context::{DrawCommand, RenderContext},
    ui::{legend::Legend, table::Table},
};
use egui::{load::TexturePoll, Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

/// Shared styling for the visualizer widgets
#[derive(Debug, Clone)]
pub struct CanvasStyle {
    /// Fill of the background map frame
    pub map_fill: Color32,
    pub map_stroke: Stroke,
    pub label_color: Color32,
    pub legend_swatch: f32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            map_fill: Color32::from_rgb(235, 240, 232),
            map_stroke: Stroke::new(1.0, Color32::from_gray(140)),
            label_color: Color32::from_gray(90),
            legend_swatch: 8.0,
        }
    }
}

/// Paints a frame's draw queue into a viewport-sized area
pub struct MapCanvas;

impl MapCanvas {
    pub fn show(ui: &mut Ui, context: &RenderContext, style: &CanvasStyle) -> Response {
        let size = Vec2::new(context.width as f32, context.height as f32);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let to_screen = |p: &Point| rect.min + Vec2::new(p.x as f32, p.y as f32);

        let mut hovered: Option<&str> = None;
        let pointer = response.hover_pos();

        for command in context.get_drawing_queue() {
            match command {
                DrawCommand::Image {
                    href,
                    bounds,
                    opacity,
                } => {
                    let image_rect = Rect::from_min_max(to_screen(&bounds.0), to_screen(&bounds.1));
                    let image = egui::Image::new(image_uri(href));
                    match image.load_for_size(ui.ctx(), image_rect.size()) {
                        Ok(TexturePoll::Ready { texture }) => {
                            painter.image(
                                texture.id,
                                image_rect,
                                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                                Color32::WHITE.gamma_multiply(*opacity),
                            );
                        }
                        // Still loading or unreadable: show where the map goes.
                        Ok(TexturePoll::Pending { .. }) | Err(_) => {
                            painter.rect_filled(image_rect, 0.0, style.map_fill);
                            painter.rect_stroke(image_rect, 0.0, style.map_stroke);
                            painter.text(
                                rect.left_bottom() + Vec2::new(4.0, -4.0),
                                Align2::LEFT_BOTTOM,
                                href,
                                FontId::proportional(10.0),
                                style.label_color,
                            );
                        }
                    }
                }
                DrawCommand::Point {
                    position,
                    style: point_style,
                    label,
                } => {
                    let center = to_screen(position);
                    let fill: Color32 = point_style.fill_color.into();
                    painter.circle(
                        center,
                        point_style.radius,
                        fill.gamma_multiply(point_style.opacity),
                        Stroke::new(point_style.stroke_width, point_style.stroke_color),
                    );
                    if let (Some(pointer), Some(label)) = (pointer, label) {
                        if pointer.distance(center) <= point_style.radius {
                            hovered = Some(label);
                        }
                    }
                }
            }
        }

        match hovered {
            Some(label) => response.on_hover_text_at_pointer(label),
            None => response,
        }
    }
}

/// URI for the image loaders; bare paths are read from disk
pub fn image_uri(href: &str) -> String {
    if href.contains("://") {
        href.to_string()
    } else {
        format!("file://{}", href)
    }
}

/// Striped table with one row per town
pub struct TableComponent;

impl TableComponent {
    pub fn show(ui: &mut Ui, table: &Table) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("town_table")
                .striped(true)
                .num_columns(Table::HEADERS.len())
                .show(ui, |ui| {
                    for header in Table::HEADERS {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for row in &table.rows {
                        ui.label(row.name.as_str());
                        ui.label(row.inhabitants.to_string());
                        ui.label(row.infected.to_string());
                        ui.label(row.percentage.as_str());
                        ui.end_row();
                    }
                });
        });
    }
}

/// Vertical list of gradient stops
pub struct LegendComponent;

impl LegendComponent {
    pub fn show(ui: &mut Ui, legend: &Legend, style: &CanvasStyle) {
        for item in &legend.items {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(
                    Vec2::splat(style.legend_swatch * 2.0),
                    Sense::hover(),
                );
                ui.painter()
                    .circle_filled(rect.center(), style.legend_swatch, Into::<egui::Color32>::into(item.colour));
                ui.label(item.label.as_str());
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_uri() {
        assert_eq!(image_uri("resource/belgium.svg"), "file://resource/belgium.svg");
        assert_eq!(
            image_uri("https://upload.wikimedia.org/map.svg"),
            "https://upload.wikimedia.org/map.svg"
        );
    }

    #[test]
    fn test_canvas_paints_frame() {
        let mut context = RenderContext::new(100, 80).unwrap();
        context.begin_frame();
        context
            .render_image(
                "resource/missing.svg",
                (Point::new(-10.0, -10.0), Point::new(150.0, 120.0)),
                1.0,
            )
            .unwrap();
        context
            .render_point(
                &Point::new(50.0, 40.0),
                &crate::rendering::context::PointRenderStyle::default(),
                Some("Gent: 3"),
            )
            .unwrap();

        let ctx = egui::Context::default();
        let mut rect = Rect::NOTHING;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rect = MapCanvas::show(ui, &context, &CanvasStyle::default()).rect;
            });
        });

        assert_eq!(rect.size(), Vec2::new(100.0, 80.0));
    }
}
