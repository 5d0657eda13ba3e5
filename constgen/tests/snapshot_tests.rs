//! Snapshot tests for rendered constants classes.
//!
//! These tests use insta to capture the exact C# text of each class shape.
//! Run `cargo insta review` to review and accept snapshot changes.

use constgen::{
    ClassKind, GeneratedClass, Member,
    emitter::render,
    resources::{ResourceEntry, deduplicate},
};

#[test]
fn snapshot_tags_class() {
    let class = GeneratedClass::new("Tags", "k", ClassKind::Tags).with_members(vec![
        Member::named("Untagged").unwrap(),
        Member::named("Player").unwrap(),
        Member::named("MainCamera").unwrap(),
        Member::named("enemy-spawn").unwrap(),
    ]);

    insta::assert_snapshot!("tags_class", render(&class));
}

#[test]
fn snapshot_layers_class() {
    let class = GeneratedClass::new("Layers", "k", ClassKind::Layers).with_members(vec![
        Member::int("Default", 0).unwrap(),
        Member::int("TransparentFX", 1).unwrap(),
        Member::int("Ignore Raycast", 2).unwrap(),
        Member::int("Water", 4).unwrap(),
        Member::int("UI", 5).unwrap(),
    ]);

    insta::assert_snapshot!("layers_class", render(&class));
}

#[test]
fn snapshot_scenes_class() {
    let class = GeneratedClass::new("Scenes", "k", ClassKind::Scenes).with_members(vec![
        Member::named("Level1").unwrap(),
        Member::named("Main Menu").unwrap(),
    ]);

    insta::assert_snapshot!("scenes_class", render(&class));
}

#[test]
fn snapshot_resources_class_after_dedup() {
    let entries = vec![
        ResourceEntry {
            name: "Enemy".to_string(),
            relative_path: "Characters/Enemy".to_string(),
        },
        ResourceEntry {
            name: "hudIcon".to_string(),
            relative_path: "UI/hudIcon".to_string(),
        },
        ResourceEntry {
            name: "enemy".to_string(),
            relative_path: "Legacy/enemy".to_string(),
        },
    ];
    let deduplicated = deduplicate(&entries).unwrap();
    let class = GeneratedClass::new("Resources", "k", ClassKind::Resources)
        .with_members(deduplicated.members);

    insta::assert_snapshot!("resources_class", render(&class));
}
