use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use claims::{
    admission, ClaimRegistry, ClaimsConfig, ClaimsPlugin, ClickKind, PermissionSet,
    SelectPointEvent, SelectionState,
};

fn main() {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(50))))
        .add_plugins(LogPlugin::default())
        .add_plugins(ClaimsPlugin);

    // Demo mode: runs a scripted claim session against the live resources and
    // exits. A real deployment replaces this with the server's command and
    // interaction glue.
    if std::env::var("PALISADE_DEMO").is_ok() {
        app.init_resource::<DemoScript>();
        app.add_systems(Update, drive_demo);
    }

    app.run();
}

/// Frame counter for the scripted demo session.
#[derive(Resource, Default)]
struct DemoScript {
    step: u32,
}

fn drive_demo(
    mut script: ResMut<DemoScript>,
    mut clicks: EventWriter<SelectPointEvent>,
    mut registry: ResMut<ClaimRegistry>,
    mut selection: ResMut<SelectionState>,
    config: Res<ClaimsConfig>,
    mut exit: EventWriter<AppExit>,
) {
    script.step += 1;
    match script.step {
        // Steve marks out two corners with the selection tool.
        1 => {
            clicks.send(SelectPointEvent {
                actor: "Steve".to_string(),
                world: "overworld".to_string(),
                point: Vec3::new(-24.0, 60.0, -24.0),
                kind: ClickKind::Left,
            });
            clicks.send(SelectPointEvent {
                actor: "Steve".to_string(),
                world: "overworld".to_string(),
                point: Vec3::new(24.0, 90.0, 24.0),
                kind: ClickKind::Right,
            });
        }
        // By now the clicks have been applied; claim the selection.
        3 => {
            let perms = PermissionSet::new();
            match admission::claim_from_selection(
                &mut registry,
                &mut selection,
                &config,
                &perms,
                "Steve",
                "spawn-town",
            ) {
                Ok(outcome) => {
                    info!("claim `spawn-town` registered");
                    if let Some(limit) = outcome.near_count_limit {
                        warn!("Steve is one claim away from the limit of {limit}");
                    }
                }
                Err(err) => warn!("claim rejected: {err}"),
            }
        }
        5 => {
            info!("{} claim(s) registered, shutting down", registry.len());
            exit.send(AppExit::Success);
        }
        _ => {}
    }
}
