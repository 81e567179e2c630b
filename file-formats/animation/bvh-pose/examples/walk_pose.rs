//! Resolve a short animation of a two-segment leg and log the foot position
//!
//! Run with `RUST_LOG=debug cargo run --example walk_pose`

use bvh_pose::{Animation, Channel, PoseOptions, Skeleton};
use glam::DVec3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut skeleton = Skeleton::new(
        "Hips",
        DVec3::new(0.0, 90.0, 0.0),
        Channel::parse_list([
            "Xposition",
            "Yposition",
            "Zposition",
            "Zrotation",
            "Xrotation",
            "Yrotation",
        ])?,
    );
    let thigh = skeleton.add_joint(
        skeleton.root(),
        "LeftUpLeg",
        DVec3::new(10.0, 0.0, 0.0),
        Channel::parse_list(["Zrotation", "Xrotation", "Yrotation"])?,
    )?;
    let shin = skeleton.add_joint(
        thigh,
        "LeftLeg",
        DVec3::new(0.0, -45.0, 0.0),
        Channel::parse_list(["Zrotation", "Xrotation", "Yrotation"])?,
    )?;
    let foot = skeleton.add_end_site(shin, DVec3::new(0.0, -45.0, 0.0))?;

    // Centimetres in the source, metres out
    let mut animation = Animation::new(skeleton)?
        .with_frame_time(1.0 / 30.0)
        .with_options(PoseOptions {
            translation_scale: 0.01,
            ..PoseOptions::default()
        });

    for i in 0..30 {
        let phase = f64::from(i) / 30.0 * std::f64::consts::TAU;
        let swing = 30.0 * phase.sin();
        let bend = 20.0 * (1.0 - phase.cos());
        animation.add_frame(vec![
            0.0, 0.0, f64::from(i) * 2.0, 0.0, 0.0, 0.0, 0.0, swing, 0.0, 0.0, bend, 0.0,
        ]);
    }
    animation.validate()?;

    for (frame, pose) in animation.poses().enumerate() {
        let position = pose?.position_by_identity(foot)?;
        log::info!(
            "frame {:2}: foot at ({:.3}, {:.3}, {:.3})",
            frame,
            position.x,
            position.y,
            position.z
        );
    }

    if let Some(duration) = animation.duration() {
        log::info!("{} frames, {:.2}s", animation.frame_count(), duration);
    }

    Ok(())
}
