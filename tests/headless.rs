//! Drive the whole frame loop without a window.

use slither::{glam::DVec2, Action, Canvas, Config, DrawList, Input, Renderer, Slither};

/// Pointer circling around the middle of the buffer.
fn circling(frame: u64) -> DVec2 {
    let t = frame as f64 * 0.03;

    DVec2::new(400.0 + 150.0 * t.cos(), 300.0 + 150.0 * t.sin())
}

#[test]
fn scripted_run_draws_chain() {
    let config = Config::default();
    let mut canvas = Canvas::new(
        (config.buffer_width, config.buffer_height),
        config.background_color,
    );
    let mut slither = Slither::new(config.clone()).unwrap();

    // Tap grow every 20 frames, holding it down for 5
    let mut source = |frame: u64, input: &mut Input| {
        input.set_pointer(circling(frame));
        input.handle_action(Action::Grow, frame % 20 < 5);
    };
    let ran = slither.run(&mut source, &mut canvas, 200, 1.0 / 60.0);
    assert_eq!(ran, 200);

    // One segment per tap
    assert_eq!(slither.simulator().len(), 1 + 10);

    // Head is drawn on top of the body in its own color
    let head = slither.simulator().head().position;
    assert_eq!(canvas.pixel(head), Some(config.even_color));

    // Far corner is untouched
    assert_eq!(
        canvas.pixel(DVec2::new(0.0, 0.0)),
        Some(config.background_color)
    );

    let mut png = Vec::new();
    canvas.encode_png(&mut png).unwrap();
    assert!(png.len() > 8);
}

#[test]
fn every_segment_is_drawn_each_frame() {
    let mut slither = Slither::new(Config::default().with_initial_length(5)).unwrap();
    let mut list = DrawList::default();

    slither.input_mut().set_pointer((420.0, 310.0));
    for _ in 0..3 {
        slither.frame(1.0 / 60.0, &mut list);

        // Body and four eye discs, cleared between frames
        assert_eq!(list.discs.len(), 5 + 4);
    }
}

#[test]
fn dynamic_renderer_is_accepted() {
    let mut slither = Slither::new(Config::default()).unwrap();
    let mut list = DrawList::default();

    let renderer: &mut dyn Renderer = &mut list;
    slither.input_mut().set_pointer((10.0, 10.0));
    slither.frame(1.0 / 60.0, renderer);

    assert_eq!(list.clear_color, Some(Config::default().background_color));
}

#[test]
fn config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("slither-config-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "min_distance = 12.0\nmax_distance = 24.0\ninitial_length = 3\n",
    )
    .unwrap();

    let config = Config::from_toml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let slither = Slither::new(config).unwrap();
    assert_eq!(slither.simulator().len(), 3);
    assert_eq!(slither.simulator().settings().min_distance, 12.0);
}

#[test]
fn missing_config_file_is_an_error() {
    assert!(Config::from_toml_file("does/not/exist.toml").is_err());
}

#[test]
fn demo_config_is_valid() {
    let config = Config::from_toml_str(include_str!("../demos/slither.toml")).unwrap();

    assert_eq!(config.initial_length, 3);
    assert_eq!(config.head_position, DVec2::new(400.0, 300.0));
}

#[test]
fn pointer_jump_across_the_buffer_keeps_segments_finite() {
    let mut slither = Slither::new(Config::default().with_initial_length(4)).unwrap();
    let mut list = DrawList::default();

    slither.input_mut().set_pointer((10.0, 10.0));
    for _ in 0..300 {
        slither.frame(1.0 / 60.0, &mut list);
    }

    // Jump to the opposite corner and keep growing
    slither.input_mut().set_pointer((790.0, 590.0));
    for frame in 0..60 {
        slither
            .input_mut()
            .handle_action(Action::Grow, frame % 10 == 0);
        slither.frame(1.0 / 60.0, &mut list);

        for segment in slither.simulator().segments() {
            assert!(
                segment.position.is_finite(),
                "frame {frame} segment {segment:?}"
            );
        }
        assert!(list.discs.iter().all(|disc| disc.center.is_finite()));
    }
}
