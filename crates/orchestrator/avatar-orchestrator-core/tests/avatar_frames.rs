use avatar_animation_core::{parse_clip_json, Clip, Skeleton, Track};
use avatar_api_core::{TrackPath, Value};
use avatar_lipsync_core::{AudioClock, Cue, CueTrack, GateAction, ManualClock, MorphMesh, Viseme};
use avatar_orchestrator::{AssetLibrary, Avatar, AvatarControls, AvatarPreset};

const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn face_meshes() -> Vec<MorphMesh> {
    let visemes: Vec<&str> = Viseme::ALL.iter().map(|v| v.morph_name()).collect();
    vec![
        MorphMesh::with_targets("Wolf3D_Head", visemes.iter().copied()),
        MorphMesh::with_targets("Wolf3D_Teeth", visemes.iter().copied()),
        MorphMesh::without_targets("Wolf3D_Body"),
    ]
}

fn library() -> AssetLibrary {
    let mut lib = AssetLibrary::new();
    let clip = avatar_test_fixtures::clips::json("simple-standing").expect("clip fixture");
    lib.load_clip_json("simple-standing", &clip).expect("load clip");
    let cues = avatar_test_fixtures::cues::json("audio_1").expect("cue fixture");
    lib.load_cues_json("audio_1", &cues).expect("load cues");
    lib
}

fn avatar(preset: AvatarPreset, lib: &mut AssetLibrary) -> Avatar {
    let fx = avatar_test_fixtures::skeletons::load("rpm-full-body").expect("skeleton fixture");
    let skeleton = lib.register_skeleton(Skeleton::from_names(fx.name, fx.bones));
    let mut avatar =
        Avatar::from_preset(preset, skeleton, face_meshes(), ManualClock::with_duration(2.43));
    avatar
        .set_idle_clip_named(lib, "simple-standing")
        .expect("idle clip");
    avatar
}

/// it should bind every Mixamo track onto the full-body rig under the retargeted preset
#[test]
fn retargeted_preset_binds_all_tracks() {
    let mut lib = library();
    let a = avatar(AvatarPreset::Retargeted, &mut lib);
    let report = a.anim.report().expect("bound");
    assert_eq!(report.kept, 23);
    assert!(report.is_complete());
    let clip = a.anim.player.clip().expect("clip");
    assert_eq!(clip.name, "mixamo.com_retargeted");
}

/// it should play an empty clip without fault when no source bone matches
#[test]
fn standard_preset_on_mismatched_rig_plays_nothing() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Standard, &mut lib);
    let report = a.anim.report().expect("bound").clone();
    assert_eq!(report.kept, 0);
    assert_eq!(report.unresolved.len(), 22);

    let frame = a.step(DT);
    assert_eq!(frame.bones_animated, 0);
    assert_eq!(frame.corrections_applied, 0);
    assert!(a.anim.player.is_playing());
}

/// it should write pose corrections after the clip so they win every frame
#[test]
fn corrections_override_clip_output() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Retargeted, &mut lib);
    for _ in 0..30 {
        let frame = a.step(DT);
        assert_eq!(frame.bones_animated, 23);
        assert_eq!(frame.corrections_applied, 6);

        let left_arm = a.skeleton.bone("LeftArm").expect("LeftArm");
        approx(left_arm.local.rotation[0], 0.9, 1e-6);
        let right_shoulder = a.skeleton.bone("RightShoulder").expect("RightShoulder");
        approx(right_shoulder.local.rotation[1], 0.04, 1e-6);
        approx(right_shoulder.local.rotation[2], 1.17, 1e-6);
    }
}

/// it should blend from the clock position read during the frame and record each morph write
#[test]
fn lipsync_follows_the_audio_clock() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Retargeted, &mut lib);
    let controls = AvatarControls {
        play_audio: true,
        ..a.controls().clone()
    };
    assert_eq!(a.apply_controls(&controls, &lib), GateAction::Restarted);
    assert!(a.lipsync.cues().is_some());

    let pp = TrackPath::morph_influence("Wolf3D_Head", "viseme_PP");
    let mut saw_a_cue = false;
    while a.clock.is_playing() {
        a.clock.advance(DT);
        let frame = a.step(DT);
        assert_eq!(frame.audio_time, a.clock.position());
        assert_eq!(frame.morph_slots_written, 18);
        assert_eq!(frame.morph_writes.len(), 18);
        assert_eq!(
            frame.morph_writes.get(&pp),
            Some(&Value::Float(frame.weights.get(Viseme::PP)))
        );
        if (1.2..1.4).contains(&frame.audio_time) {
            assert_eq!(frame.active_cue, Some(7));
            saw_a_cue = true;
        }
    }
    assert!(saw_a_cue);
    approx(a.clock.position(), 2.43, 1e-6);
}

/// it should zero every channel and drop the cue track when blending is disabled
#[test]
fn disabling_blending_clears_channels() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Standard, &mut lib);
    a.set_cues(Some(CueTrack::new(vec![Cue::new(0.0, 10.0, "D")])));
    a.clock.play();
    a.clock.set_position(1.0);
    for _ in 0..10 {
        a.step(DT);
    }
    assert!(a.meshes[0].influence("viseme_AA").unwrap_or(0.0) > 0.1);

    a.set_blending_enabled(false);
    let frame = a.step(DT);
    assert!(frame.weights.is_zero());
    assert!(frame.active_cue.is_none());
    assert!(a.lipsync.cues().is_none());
    assert_eq!(a.meshes[0].influence("viseme_AA"), Some(0.0));
}

/// it should take a swapped cue track on the very next frame
#[test]
fn cue_swap_applies_next_frame() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Standard, &mut lib);
    a.clock.set_position(0.5);
    a.set_cues(Some(CueTrack::new(vec![Cue::new(0.0, 1.0, "D")])));
    assert!(a.step(DT).weights.get(Viseme::AA) > 0.0);

    a.set_cues(Some(CueTrack::new(vec![Cue::new(0.0, 1.0, "A")])));
    let frame = a.step(DT);
    assert!(frame.weights.get(Viseme::PP) > 0.0);
    assert_eq!(a.lipsync.engine().targets().get(Viseme::AA), 0.0);
}

/// it should stop the idle clip while keeping the pose corrections applied
#[test]
fn play_animation_toggle() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Retargeted, &mut lib);
    let stop = AvatarControls {
        play_animation: false,
        ..a.controls().clone()
    };
    a.apply_controls(&stop, &lib);
    let frame = a.step(DT);
    assert_eq!(frame.bones_animated, 0);
    assert_eq!(frame.corrections_applied, 6);

    let resume = AvatarControls {
        play_animation: true,
        ..stop
    };
    a.apply_controls(&resume, &lib);
    assert!(a.anim.player.is_playing());
    assert_eq!(a.anim.player.time(), 0.0);
}

/// it should scale clip time by the animation speed control
#[test]
fn animation_speed_scales_clip_time() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Retargeted, &mut lib);
    a.step(1.0);
    approx(a.anim.player.time(), 0.53, 1e-6);

    let faster = AvatarControls {
        animation_speed: 2.0,
        ..a.controls().clone()
    };
    a.apply_controls(&faster, &lib);
    a.step(0.25);
    approx(a.anim.player.time(), 1.03, 1e-5);
}

/// it should reuse the retargeted clip when the same clip is bound again
#[test]
fn rebinding_hits_the_cache() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Retargeted, &mut lib);
    a.set_idle_clip_named(&lib, "simple-standing").unwrap();
    assert_eq!(a.anim.cache().stats(), (1, 1));
    assert!(a.set_idle_clip_named(&lib, "missing").is_err());
}

/// it should leave the face idle when the selected script has no cue track
#[test]
fn unknown_script_has_no_cues() {
    let mut lib = library();
    let mut a = avatar(AvatarPreset::Standard, &mut lib);
    let controls = AvatarControls {
        script: "audio_9".into(),
        play_audio: true,
        ..AvatarControls::default()
    };
    a.apply_controls(&controls, &lib);
    assert!(a.lipsync.cues().is_none());
    a.clock.advance(0.5);
    assert!(a.step(DT).weights.is_zero());
}

/// it should report missing bones for a half-body rig without failing
#[test]
fn half_body_missing_bones() {
    let mut lib = library();
    let fx = avatar_test_fixtures::skeletons::load("rpm-half-body").unwrap();
    let skeleton = lib.register_skeleton(Skeleton::from_names(fx.name, fx.bones));
    let mut a = Avatar::from_preset(
        AvatarPreset::Retargeted,
        skeleton,
        face_meshes(),
        ManualClock::new(),
    );
    let clip = parse_clip_json(&avatar_test_fixtures::clips::json("simple-standing").unwrap())
        .unwrap();
    let missing = a.anim.missing_bones(&clip, &a.skeleton);
    assert!(missing.iter().any(|b| b == "LeftHand"));
    let report = a.set_idle_clip(&clip);
    assert_eq!(report.unresolved, missing);
    assert!(a.step(DT).bones_animated > 0);
}

/// it should keep clips from separate libraries apart in the retarget cache
#[test]
fn clips_from_two_libraries_do_not_alias() {
    let one_track = |name: &str, duration: f32| {
        Clip::new(
            name,
            duration,
            vec![Track::new(
                "mixamorigHips.position",
                vec![0.0],
                vec![Value::vec3(0.0, 1.0, 0.0)],
            )],
        )
    };
    let mut lib_a = library();
    lib_a.insert_clip("stand", one_track("stand", 1.0));
    let mut lib_b = AssetLibrary::new();
    lib_b.insert_clip("wave", one_track("wave", 3.0));
    assert_ne!(
        lib_a.clip("stand").and_then(|c| c.id),
        lib_b.clip("wave").and_then(|c| c.id)
    );

    let mut a = avatar(AvatarPreset::Retargeted, &mut lib_a);
    a.set_idle_clip_named(&lib_a, "stand").unwrap();
    a.set_idle_clip_named(&lib_b, "wave").unwrap();
    let bound = a.anim.player.clip().expect("clip");
    assert_eq!(bound.name, "wave_retargeted");
    assert_eq!(bound.duration, 3.0);
}

/// it should rewind the clock when the script changes while audio is paused
#[test]
fn script_change_while_paused_keeps_mouth_closed() {
    let mut lib = library();
    lib.insert_cues("audio_2", CueTrack::new(vec![Cue::new(0.5, 1.0, "D")]));
    let mut a = avatar(AvatarPreset::Standard, &mut lib);

    let playing = AvatarControls {
        play_audio: true,
        ..AvatarControls::default()
    };
    a.apply_controls(&playing, &lib);
    a.clock.advance(0.75);
    let paused = AvatarControls {
        play_audio: false,
        ..playing
    };
    a.apply_controls(&paused, &lib);
    approx(a.clock.position(), 0.75, 1e-6);

    let switched = AvatarControls {
        script: "audio_2".into(),
        ..paused
    };
    a.apply_controls(&switched, &lib);
    assert_eq!(a.clock.position(), 0.0);
    assert!(!a.clock.is_playing());
    for _ in 0..30 {
        a.step(DT);
    }
    assert!(a.meshes[0].influence("viseme_AA").unwrap_or(1.0) < 1e-3);
}
