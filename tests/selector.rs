use setdisplay::selector::{self, closest, exact, highest, highest_target, list_all, select};
use setdisplay::{DisplayMode, MatchPolicy, Mode, SelectError};

fn sample_modes() -> Vec<Mode> {
    vec![
        Mode::new(800, 600, 32, 60.0),
        Mode::new(1024, 768, 32, 75.0),
        Mode::new(1920, 1080, 32, 60.0),
    ]
}

#[test]
fn test_exact_finds_matching_resolution_and_depth() {
    let modes = sample_modes();
    let target = Mode::new(1024, 768, 32, 75.0);

    let found = exact(&target, &modes).expect("exact mode should be found");
    assert_eq!(*found, Mode::new(1024, 768, 32, 75.0));
}

#[test]
fn test_exact_ignores_refresh_rate() {
    let modes = vec![
        Mode::new(1024, 768, 16, 60.0),
        Mode::new(1024, 768, 32, 60.0),
        Mode::new(1024, 768, 32, 85.0),
    ];
    let target = Mode::new(1024, 768, 32, 75.0);

    // the first mode with equal width, height and depth wins
    assert_eq!(*exact(&target, &modes).unwrap(), Mode::new(1024, 768, 32, 60.0));
}

#[test]
fn test_exact_reports_no_match() {
    let modes = sample_modes();
    let target = Mode::new(1280, 1024, 32, 60.0);
    assert_eq!(exact(&target, &modes), Err(SelectError::NoMatch));

    let target = Mode::new(1024, 768, 16, 75.0);
    assert_eq!(exact(&target, &modes), Err(SelectError::NoMatch));
}

#[test]
fn test_exact_never_returns_a_different_resolution() {
    let modes = vec![
        Mode::new(640, 480, 8, 60.0),
        Mode::new(640, 480, 16, 60.0),
        Mode::new(1280, 720, 32, 60.0),
        Mode::new(1280, 800, 32, 60.0),
        Mode::new(2560, 1440, 32, 144.0),
    ];

    for target in &modes {
        for bpp in [8, 16, 32] {
            let target = Mode::new(target.width, target.height, bpp, 0.0);
            match exact(&target, &modes) {
                Ok(found) => {
                    assert_eq!(found.width, target.width);
                    assert_eq!(found.height, target.height);
                    assert_eq!(found.bits_per_pixel, target.bits_per_pixel);
                }
                Err(err) => assert_eq!(err, SelectError::NoMatch),
            }
        }
    }
}

#[test]
fn test_closest_picks_nearest_resolution() {
    let modes = sample_modes();
    let target = Mode::new(1000, 700, 16, 70.0);

    assert_eq!(*closest(&target, &modes).unwrap(), Mode::new(1024, 768, 32, 75.0));
}

#[test]
fn test_closest_prefers_better_depth_and_refresh_on_equal_resolution() {
    let modes = vec![
        Mode::new(1024, 768, 8, 60.0),
        Mode::new(1024, 768, 32, 60.0),
        Mode::new(1024, 768, 32, 75.0),
        Mode::new(1024, 768, 16, 75.0),
    ];
    let target = Mode::new(1024, 768, 32, 75.0);

    assert_eq!(*closest(&target, &modes).unwrap(), Mode::new(1024, 768, 32, 75.0));
}

#[test]
fn test_closest_keeps_best_when_only_one_field_improves() {
    let modes = vec![
        Mode::new(1024, 768, 32, 60.0),
        // better refresh but worse depth: not taken
        Mode::new(1024, 768, 16, 75.0),
    ];
    let target = Mode::new(1024, 768, 32, 75.0);

    assert_eq!(*closest(&target, &modes).unwrap(), Mode::new(1024, 768, 32, 60.0));
}

#[test]
fn test_closest_equal_distance_overwrites_earlier_mode() {
    // both modes are 100 pixels away in summed width and height
    let modes = vec![Mode::new(924, 768, 32, 75.0), Mode::new(1074, 718, 8, 30.0)];
    let target = Mode::new(1024, 768, 32, 75.0);

    // the later mode replaces the earlier one on an equal summed distance,
    // even though its depth and refresh are further away
    assert_eq!(*closest(&target, &modes).unwrap(), Mode::new(1074, 718, 8, 30.0));
}

#[test]
fn test_closest_compares_fractional_refresh_rates() {
    let modes = vec![Mode::new(1024, 768, 32, 60.0), Mode::new(1024, 768, 32, 59.94)];
    let target = Mode::new(1024, 768, 32, 60.0);

    // 59.94 Hz is 0.06 Hz further away, so it does not replace the 60 Hz mode
    assert_eq!(*closest(&target, &modes).unwrap(), Mode::new(1024, 768, 32, 60.0));

    let modes = vec![Mode::new(1024, 768, 32, 59.94), Mode::new(1024, 768, 32, 60.0)];
    assert_eq!(*closest(&target, &modes).unwrap(), Mode::new(1024, 768, 32, 60.0));
}

#[test]
fn test_closest_first_mode_initializes_best() {
    let modes = vec![Mode::new(320, 200, 8, 0.0)];
    let target = Mode::new(4096, 2160, 32, 120.0);

    assert_eq!(*closest(&target, &modes).unwrap(), Mode::new(320, 200, 8, 0.0));
}

#[test]
fn test_closest_returns_a_listed_mode() {
    let modes = vec![
        Mode::new(640, 480, 8, 60.0),
        Mode::new(1280, 720, 32, 59.94),
        Mode::new(1280, 800, 32, 60.0),
        Mode::new(2560, 1440, 32, 144.0),
    ];

    for width in (0..3000).step_by(250) {
        for height in (0..2000).step_by(250) {
            let target = Mode::new(width, height, 32, 60.0);
            let found = closest(&target, &modes).unwrap();
            assert!(modes.contains(found), "{} is not a listed mode", found);
        }
    }
}

#[test]
fn test_highest_target_takes_independent_maxima() {
    let modes = vec![
        Mode::new(1920, 1080, 16, 60.0),
        Mode::new(1600, 1200, 32, 50.0),
        Mode::new(800, 600, 8, 85.0),
    ];

    assert_eq!(highest_target(&modes).unwrap(), Mode::new(1920, 1200, 32, 85.0));
}

#[test]
fn test_highest_matches_synthesized_target() -> Result<(), Box<dyn std::error::Error>> {
    let modes = sample_modes();

    assert_eq!(highest_target(&modes)?, Mode::new(1920, 1080, 32, 75.0));
    assert_eq!(*highest(&modes)?, Mode::new(1920, 1080, 32, 60.0));

    let selection = select(MatchPolicy::Highest, &Mode::new(1, 1, 8, 1.0), &modes)?;
    assert_eq!(selection.target, Mode::new(1920, 1080, 32, 75.0));
    assert_eq!(*selection.mode, Mode::new(1920, 1080, 32, 60.0));
    assert!(!selection.is_exact());

    Ok(())
}

#[test]
fn test_select_keeps_the_callers_target() -> Result<(), Box<dyn std::error::Error>> {
    let modes = sample_modes();
    let target = Mode::new(1024, 768, 32, 75.0);

    let selection = select(MatchPolicy::Exact, &target, &modes)?;
    assert_eq!(selection.target, target);
    assert!(selection.is_exact());

    let selection = select(MatchPolicy::Closest, &Mode::new(1000, 700, 16, 70.0), &modes)?;
    assert_eq!(*selection.mode, Mode::new(1024, 768, 32, 75.0));
    assert!(!selection.is_exact());

    Ok(())
}

#[test]
fn test_empty_mode_list_is_invalid_for_every_policy() {
    let modes: Vec<Mode> = Vec::new();
    let target = Mode::new(1024, 768, 32, 75.0);

    assert_eq!(exact(&target, &modes), Err(SelectError::NoModes));
    assert_eq!(closest(&target, &modes), Err(SelectError::NoModes));
    assert_eq!(highest(&modes), Err(SelectError::NoModes));
    assert_eq!(highest_target(&modes), Err(SelectError::NoModes));
    for policy in [MatchPolicy::Exact, MatchPolicy::Closest, MatchPolicy::Highest] {
        assert!(matches!(
            select(policy, &target, &modes),
            Err(SelectError::NoModes)
        ));
    }

    let listed: Vec<DisplayMode> = Vec::new();
    assert!(matches!(list_all(&listed), Err(SelectError::NoModes)));
}

#[test]
fn test_list_all_preserves_order_and_flags() -> Result<(), Box<dyn std::error::Error>> {
    let modes: Vec<DisplayMode> = vec![
        DisplayMode::new(Mode::new(1920, 1080, 32, 60.0), true, ()),
        DisplayMode::new(Mode::new(640, 480, 8, 60.0), false, ()),
        DisplayMode::new(Mode::new(1024, 768, 32, 75.0), true, ()),
    ];

    let lines: Vec<String> = selector::list_all(&modes)?.map(|m| m.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "1920 1080 32 60 Usable",
            "640 480 8 60 Nonusable",
            "1024 768 32 75 Usable",
        ]
    );

    Ok(())
}
