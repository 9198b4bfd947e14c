use avatar_animation_core::{
    data::{Clip, Track},
    missing_bones, parse_clip_json, retarget, BoneNameMap, Skeleton, Value,
};

fn fixture_skeleton(name: &str) -> Skeleton {
    let fx = avatar_test_fixtures::skeletons::load(name).expect("skeleton fixture");
    Skeleton::from_names(fx.name, fx.bones)
}

fn fixture_clip(name: &str) -> Clip {
    let json = avatar_test_fixtures::clips::json(name).expect("clip fixture");
    parse_clip_json(&json).expect("parse clip fixture")
}

fn key_track(name: &str) -> Track {
    Track::new(name, vec![0.0, 1.0], vec![Value::f(0.0), Value::f(1.0)])
}

/// it should pass every track through unchanged under an identity map when all bones exist
#[test]
fn identity_map_passes_all_tracks_through() {
    let source = Clip::new(
        "wave",
        3.5,
        vec![
            key_track("Hips.position"),
            key_track("Spine.quaternion"),
            key_track("LeftHand.quaternion"),
        ],
    );
    let sk = Skeleton::from_names("avatar", ["Hips", "Spine", "LeftHand"]);
    let out = retarget(&source, &sk, &BoneNameMap::identity());

    assert_eq!(out.clip.tracks.len(), source.tracks.len());
    assert_eq!(out.clip.duration, source.duration);
    for (a, b) in source.tracks.iter().zip(out.clip.tracks.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.times, b.times);
        assert_eq!(a.values, b.values);
    }
    assert!(out.report.is_complete());
}

/// it should drop only the LeftHand track when the target skeleton lacks that bone
#[test]
fn missing_left_hand_drops_only_that_track() {
    let source = Clip::new(
        "wave",
        1.0,
        vec![
            key_track("Hips.position"),
            key_track("LeftHand.quaternion"),
            key_track("RightHand.quaternion"),
        ],
    );
    let sk = Skeleton::from_names("avatar", ["Hips", "RightHand"]);
    let out = retarget(&source, &sk, &BoneNameMap::identity());

    let names: Vec<&str> = out.clip.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Hips.position", "RightHand.quaternion"]);
    assert_eq!(out.report.unresolved, vec!["LeftHand".to_string()]);
    assert_eq!(out.report.kept, 2);
    assert_eq!(out.report.dropped, 1);
}

/// it should not mutate the source clip
#[test]
fn source_clip_is_untouched() {
    let source = fixture_clip("simple-standing");
    let before = source.clone();
    let sk = fixture_skeleton("rpm-full-body");
    let _ = retarget(&source, &sk, &BoneNameMap::mixamo());
    assert_eq!(source, before);
}

/// it should retarget the Mixamo fixture completely onto a full-body rig
#[test]
fn mixamo_fixture_onto_full_body() {
    let source = fixture_clip("simple-standing");
    let sk = fixture_skeleton("rpm-full-body");
    let out = retarget(&source, &sk, &BoneNameMap::mixamo());
    assert_eq!(out.clip.tracks.len(), source.tracks.len());
    assert!(out
        .clip
        .tracks
        .iter()
        .all(|t| !t.name.starts_with("mixamorig")));
    assert_eq!(out.clip.name, "mixamo.com_retargeted");
}

/// it should keep upper-body tracks and report the missing bones on a half-body rig
#[test]
fn mixamo_fixture_onto_half_body() {
    let source = fixture_clip("simple-standing");
    let sk = fixture_skeleton("rpm-half-body");
    let map = BoneNameMap::mixamo();
    let out = retarget(&source, &sk, &map);

    // 23 tracks: Hips position + 22 bone rotations; 9 bones are absent.
    assert_eq!(out.report.kept, 14);
    assert_eq!(out.report.dropped, 9);
    assert!(out.report.unresolved.contains(&"LeftHand".to_string()));
    assert!(!out.report.unresolved.contains(&"RightHand".to_string()));
    assert_eq!(missing_bones(&source, &sk, &map), out.report.unresolved);
}

/// it should produce a valid empty clip when no bone resolves
#[test]
fn nothing_resolves_gives_empty_clip() {
    let source = fixture_clip("simple-standing");
    let sk = Skeleton::from_names("props", ["Sword"]);
    let out = retarget(&source, &sk, &BoneNameMap::identity());
    assert!(out.clip.is_empty());
    assert_eq!(out.clip.duration, 2.0);
    assert!(out.clip.validate_basic().is_ok());
}

/// it should bind exporter-prefixed tracks after cleaning the names
#[test]
fn exported_prefixes_cleaned_before_binding() {
    let exported = fixture_clip("simple-standing-exported");
    let sk = fixture_skeleton("rpm-full-body");
    let map = BoneNameMap::mixamo();

    let raw = retarget(&exported, &sk, &map);
    assert!(raw.clip.is_empty());

    let cleaned = exported.cleaned();
    let out = retarget(&cleaned, &sk, &map);
    assert_eq!(out.clip.tracks.len(), exported.tracks.len());
}
