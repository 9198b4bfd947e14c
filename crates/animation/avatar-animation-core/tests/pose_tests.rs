use std::sync::Arc;

use avatar_animation_core::{
    data::{Clip, Track},
    interp::quat_from_euler_xyz,
    retarget, Axis, BoneNameMap, ClipPlayer, PlayerConfig, PoseCorrectionSet, Skeleton, Value,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn arm_skeleton() -> Skeleton {
    Skeleton::from_names(
        "avatar",
        ["Hips", "LeftShoulder", "LeftArm", "RightShoulder", "RightArm"],
    )
}

/// it should yield the same skeleton state whether applied once or twice
#[test]
fn correction_is_idempotent() {
    let set = PoseCorrectionSet::shoulder_fix();

    let mut once = arm_skeleton();
    once.bone_mut("LeftArm").unwrap().set_rotation([0.2, 0.4, -0.1]);
    let mut twice = once.clone();

    set.apply(&mut once);
    set.apply(&mut twice);
    set.apply(&mut twice);

    for (a, b) in once.bones().iter().zip(twice.bones().iter()) {
        assert_eq!(a.local, b.local, "bone {}", a.name);
    }
}

/// it should override only the configured axis and keep the animated ones
#[test]
fn correction_leaves_other_axes_alone() {
    let mut sk = arm_skeleton();
    sk.bone_mut("LeftArm").unwrap().set_rotation([0.2, 0.4, -0.1]);
    PoseCorrectionSet::new()
        .with("LeftArm", Axis::X, 0.9)
        .apply(&mut sk);
    let arm = sk.bone("LeftArm").unwrap();
    assert_eq!(arm.local.rotation, [0.9, 0.4, -0.1]);
    let q = quat_from_euler_xyz([0.9, 0.4, -0.1]);
    for i in 0..4 {
        approx(arm.local.quaternion[i], q[i], 1e-6);
    }
}

/// it should win over the player's pose when run after the player each frame
#[test]
fn correction_after_player_overrides_animation() {
    let q = quat_from_euler_xyz([0.3, 0.1, 0.2]);
    let clip = Clip::new(
        "raise",
        1.0,
        vec![Track::new(
            "mixamorigLeftArm.quaternion",
            vec![0.0, 1.0],
            vec![Value::Quat(q), Value::Quat(q)],
        )],
    );
    let mut sk = arm_skeleton();
    let out = retarget(&clip, &sk, &BoneNameMap::mixamo());

    let mut player = ClipPlayer::new(PlayerConfig::default());
    player.set_clip(Some(Arc::clone(&out.clip)));
    player.play();

    let set = PoseCorrectionSet::shoulder_fix();
    for _ in 0..3 {
        assert_eq!(player.update(1.0 / 60.0, &mut sk), 1);
        set.apply(&mut sk);
        let e = sk.bone("LeftArm").unwrap().local.rotation;
        approx(e[0], 0.9, 1e-6);
        approx(e[1], 0.1, 1e-4);
        approx(e[2], 0.2, 1e-4);
    }
}
