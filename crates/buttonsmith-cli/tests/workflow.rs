//! End-to-end command workflow over a configuration document on disk.

use std::fs;
use std::process::ExitCode;

use buttonsmith_cli::commands;
use buttonsmith_render::png::{decode_rgba, write_rgba};
use buttonsmith_render::{Bitmap, PngConfig};
use buttonsmith_spec::InteractionState;

const CONFIG: &str = r##"{
  "buttonsmith.button.v1": {
    "width": 140,
    "height": 40,
    "colors": { "normal": "#36f", "hover": "not-a-color" },
    "noise": { "amount": 20, "blend": "multiply" }
  },
  "buttonsmith.nine-patch.v1": {
    "label": { "text": "Start Game", "fontSize": 18 },
    "states": {
      "normal": { "sourceImage": "panels/normal.png", "slices": { "top": 6, "right": 6, "bottom": 6, "left": 6 } },
      "active": { "sourceImage": "panels/missing.png" }
    }
  }
}"##;

#[test]
fn test_fmt_then_render_then_tokens() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("panels")).unwrap();
    write_rgba(
        &Bitmap::filled(20, 20, [30, 160, 90, 255]),
        &dir.path().join("panels/normal.png"),
        &PngConfig::default(),
    )
    .unwrap();

    let config = dir.path().join("button.json");
    fs::write(&config, CONFIG).unwrap();

    assert_eq!(commands::fmt::run(&config, None).unwrap(), ExitCode::SUCCESS);
    let formatted = fs::read_to_string(&config).unwrap();
    assert!(formatted.contains("#3366ff"));
    assert!(!formatted.contains("not-a-color"));

    let out = dir.path().join("out");
    commands::render::run(&config, &out, None, &[], Some(20), Some(11)).unwrap();

    let normal = decode_rgba(&fs::read(out.join("start-game-normal.png")).unwrap()).unwrap();
    assert_eq!(normal.get(0, 0), [30, 160, 90, 255]);
    // Missing source still yields a text-only raster.
    let active = decode_rgba(&fs::read(out.join("start-game-active.png")).unwrap()).unwrap();
    assert_eq!(active.get(0, 0)[3], 0);
    assert!(active.pixels().any(|p| p[3] > 0));

    let tokens = commands::tokens::collect(&config, Some(InteractionState::Normal), Some(11)).unwrap();
    assert_eq!(tokens.get("width"), Some("140px"));
    assert_eq!(tokens.get("noise.mix-blend-mode"), Some("multiply"));
    assert_eq!(tokens.get("noise.opacity"), Some("0.20"));
    assert_eq!(tokens.get("--normal-solid"), Some("#3366ff"));

    commands::button::run(&config, &out, Some(InteractionState::Hover), &[], Some(20), Some(11))
        .unwrap();
    // The button has its own label, still the default one here.
    let hover = decode_rgba(&fs::read(out.join("button-gradient-hover.png")).unwrap()).unwrap();
    assert_eq!(hover.size(), (140, 40));
}
