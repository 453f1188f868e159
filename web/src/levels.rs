use knitout_core as game;

/// Levels bundled into the app, the first one is played by default.
const LEVELS: &[(&str, &str)] = &[
    ("first-steps", include_str!("../levels/first_steps.json")),
    ("tangle", include_str!("../levels/tangle.json")),
];

fn find(name: Option<&str>) -> &'static str {
    let (_, default_json) = LEVELS[0];
    let Some(name) = name else {
        return default_json;
    };

    match LEVELS.iter().find(|&&(level_name, _)| level_name == name) {
        Some(&(_, json)) => json,
        None => {
            log::warn!("unknown level {:?}, using {:?}", name, LEVELS[0].0);
            default_json
        }
    }
}

pub(crate) fn load(name: Option<&str>) -> game::Result<game::Level> {
    game::Level::from_json(find(name))
}
