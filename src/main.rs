// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;
use colored::Colorize;

use dragroll::dice3d::{
    advance_roll_lifecycles, build_die_faces, create_die_mesh_data, draw_debug_gizmos,
    handle_keyboard, handle_pointer_press, rebuild_play_boundary, refresh_face_labels, setup,
    update_pointer_target, update_score_texts, update_velocity_debug, BoundaryRebuild,
    BoundedRegion, DiceType, FaceLabelAssets, PointerTarget, RollSettings, ScoreBoard,
};

#[derive(Parser)]
#[command(name = "dragroll")]
#[command(
    author,
    version,
    about = "Drag dice around the table, throw them and add up the results"
)]
struct Cli {
    /// Settings file (RON; JSON is accepted too)
    #[arg(short, long, default_value = "roll_settings.ron")]
    settings: PathBuf,

    /// Dice to put on the table, e.g. `-d 2d6 -d d20` (overrides the settings file)
    #[arg(short, long, value_parser = parse_dice_arg)]
    dice: Option<Vec<(usize, DiceType)>>,

    /// Print the faces detected on each die and exit
    #[arg(long)]
    print_faces: bool,
}

fn parse_dice_arg(s: &str) -> Result<(usize, DiceType), String> {
    let s = s.to_lowercase();

    let (count_str, die_str) = if s.starts_with('d') {
        ("1", s.as_str())
    } else if let Some(pos) = s.find('d') {
        (&s[..pos], &s[pos..])
    } else {
        return Err(format!(
            "Invalid dice format: {}. Use format like '2d6' or 'd20'",
            s
        ));
    };

    let count: usize = count_str
        .parse()
        .map_err(|_| format!("Invalid count: {}", count_str))?;
    let die_type = DiceType::parse(die_str)
        .ok_or_else(|| format!("Unknown die type: {}. Valid: d4, d6, d8, d20", die_str))?;

    Ok((count, die_type))
}

fn print_faces(settings: &RollSettings) {
    for die_type in &settings.dice {
        let data = create_die_mesh_data(*die_type);
        let faces = build_die_faces(*die_type, &data.positions, &data.normals, settings);

        println!(
            "{} {}",
            die_type.name().bold().cyan(),
            format!("({} faces)", faces.len()).dimmed()
        );
        if faces.is_empty() {
            println!("  {}", "no faces detected".red());
        }
        for face in faces.faces() {
            println!(
                "  {:>4}  normal ({:+.3}, {:+.3}, {:+.3})",
                face.value.to_string().yellow().bold(),
                face.normal.x,
                face.normal.y,
                face.normal.z
            );
        }
        println!();
    }
}

fn main() {
    let cli = Cli::parse();

    let mut settings = RollSettings::load_or_default(&cli.settings);
    if let Some(dice) = cli.dice {
        settings.dice = dice
            .into_iter()
            .flat_map(|(count, die_type)| std::iter::repeat(die_type).take(count))
            .collect();
    }

    if cli.print_faces {
        print_faces(&settings);
        return;
    }

    let score = ScoreBoard::new(&settings.display);
    let region = BoundedRegion::from_settings(&settings.region);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Drag & Roll".to_string(),
                        resolution: (1280u32, 720u32).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,dragroll=debug".to_string(),
                    ..default()
                }),
        )
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(settings)
        .insert_resource(score)
        .insert_resource(region)
        .insert_resource(PointerTarget::default())
        .insert_resource(BoundaryRebuild::default())
        .init_resource::<FaceLabelAssets>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                update_pointer_target,
                handle_pointer_press,
                handle_keyboard,
                advance_roll_lifecycles,
                refresh_face_labels,
                update_score_texts,
                update_velocity_debug,
                draw_debug_gizmos,
                rebuild_play_boundary,
            )
                .chain(),
        )
        .run();
}
