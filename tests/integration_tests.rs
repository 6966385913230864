use epimap::{GeoBox, LatLng, Point, Visualizer, VisualizerError, VisualizerOptions};

/// End-to-end tests driving a visualizer the way a front end does
#[cfg(test)]
mod integration_tests {
    use super::*;

    const BELGIUM: &str = r#"{
        "towns": {
            "0": {"name": "Antwerpen", "size": "500000", "lat": "51.2194", "long": "4.4025"},
            "1": {"name": "Sint Niklaas", "size": "75000", "lat": "51.1650", "long": "4.1437"},
            "2": {"name": "Liege", "size": "200000", "lat": "50.6326", "long": "5.5797"}
        },
        "days": [
            {"0": "1"},
            {"0": "4", "1": "2"},
            {"0": "10", "1": "5", "2": "1"},
            {"1": "7", "2": "3"}
        ]
    }"#;

    const WORLD: &str = r#"{
        "towns": {
            "0": {"name": "Brussel", "size": 1200000, "lat": 50.8503, "long": 4.3517},
            "1": {"name": "New York", "size": 8400000, "lat": 40.7128, "long": -74.0060}
        },
        "days": [{"0": 3, "1": 12}]
    }"#;

    fn ten_days() -> String {
        let days: Vec<String> = (0..10).map(|d| format!("{{\"0\": \"{}\"}}", d)).collect();
        format!(
            r#"{{"towns": {{"0": {{"name": "Gent", "size": "250000", "lat": "51.05", "long": "3.72"}}}}, "days": [{}]}}"#,
            days.join(",")
        )
    }

    #[test]
    fn test_local_data_uses_belgium_map() {
        let mut visualizer = Visualizer::default();
        let session = visualizer.load_str(BELGIUM).unwrap();

        assert_eq!(session.map().unwrap().name, "Belgium");
        assert_eq!(session.max_days(), 4);
        assert_eq!(session.max_single(), 10);
        assert_eq!(session.max_total(), 16);

        // Every town lands inside the viewport.
        for marker in session.markers() {
            assert!((0.0..=1.0).contains(&marker.projected.x), "{:?}", marker);
            assert!((0.0..=1.0).contains(&marker.projected.y), "{:?}", marker);
        }
    }

    #[test]
    fn test_spread_out_data_uses_earth_map() {
        let mut visualizer = Visualizer::default();
        let session = visualizer.load_str(WORLD).unwrap();

        assert_eq!(session.map().unwrap().name, "Earth");
        let crop = session.crop().unwrap();
        assert!(crop.bounds.contains(&LatLng::new(40.7128, -74.0060)));
        assert!(crop.bounds.contains(&LatLng::new(50.8503, 4.3517)));
    }

    #[test]
    fn test_largest_count_gets_full_radius() {
        let mut visualizer = Visualizer::default();
        let session = visualizer.load_str(BELGIUM).unwrap();

        assert!((session.marker_radius(10) - 10.0).abs() < 1e-9);
        assert_eq!(session.marker_radius(0), 2.0);

        session.update_day(2);
        let antwerpen = &session.markers()[0];
        assert_eq!(antwerpen.count, 10);
        assert!((antwerpen.radius - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_day_is_clamped() {
        let mut visualizer = Visualizer::default();
        let session = visualizer.load_str(&ten_days()).unwrap();

        assert_eq!(session.update_day(-5), 0);
        assert_eq!(session.update_day(15), 9);
        assert_eq!(session.display_day(), 10);
        assert_eq!(session.total_infected(), 9);
    }

    #[test]
    fn test_box_corners_project_to_viewport_corners() {
        let visible = GeoBox::new(49.0, 52.0, 2.0, 7.0);

        assert_eq!(visible.project(&LatLng::new(52.0, 2.0)), Point::new(0.0, 0.0));
        assert_eq!(visible.project(&LatLng::new(49.0, 7.0)), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_failed_load_keeps_previous_session() {
        let mut visualizer = Visualizer::default();
        visualizer.load_str(BELGIUM).unwrap().update_day(2);

        let err = visualizer.load_str("{ \"towns\": ").unwrap_err();
        assert!(matches!(err, VisualizerError::Serialization(_)));

        let err = visualizer
            .load_file("/nonexistent/simulation.json")
            .unwrap_err();
        assert!(matches!(err, VisualizerError::Io(_)));

        let session = visualizer.session().unwrap();
        assert_eq!(session.day(), 2);
        assert_eq!(session.map().unwrap().name, "Belgium");
    }

    #[test]
    fn test_load_file_and_table() {
        let path = std::env::temp_dir().join(format!("epimap-{}.json", std::process::id()));
        std::fs::write(&path, BELGIUM).unwrap();

        let mut visualizer = Visualizer::default();
        let result = visualizer.load_file(&path).map(|session| {
            session.update_day(1);
            session.table()
        });
        let _ = std::fs::remove_file(&path);
        let table = result.unwrap();

        assert_eq!(table.total_infected, 6);
        let row = table.row("SintNiklaas").unwrap();
        assert_eq!(row.inhabitants, 75_000);
        assert_eq!(row.infected, 2);
        assert_eq!(row.percentage, "0.0%");
        assert_eq!(table.row("Liege").unwrap().percentage, "");
    }

    #[test]
    fn test_svg_export_draws_map_then_towns() {
        let mut visualizer = Visualizer::default();
        let session = visualizer.load_str(BELGIUM).unwrap();
        session.update_day(2);

        let svg = session.to_svg().unwrap();

        assert!(svg.contains("width=\"950\" height=\"800\""));
        let image = svg.find("resource/belgium.svg").unwrap();
        let first_circle = svg.find("<circle").unwrap();
        assert!(image < first_circle);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("<title>Antwerpen: 10</title>"));
    }

    #[test]
    fn test_custom_options() {
        let options = VisualizerOptions::from_json_str(
            r#"{ "viewport": { "width": 400, "height": 300 }, "gradient": "Blue to red" }"#,
        )
        .unwrap();
        let mut visualizer = Visualizer::new(options);
        let session = visualizer.load_str(BELGIUM).unwrap();

        assert_eq!(session.viewport().size.width, 400.0);
        assert_eq!(session.gradient().name(), "Blue to red");
        assert_eq!(session.legend().items.len(), 3);
    }

    #[test]
    fn test_unknown_gradient_in_options_fails_load() {
        let options = VisualizerOptions {
            gradient: "Rainbow".to_string(),
            ..VisualizerOptions::default()
        };
        let mut visualizer = Visualizer::new(options);

        assert!(matches!(
            visualizer.load_str(BELGIUM),
            Err(VisualizerError::UnknownGradient(_))
        ));
        assert!(!visualizer.is_loaded());
    }
}
