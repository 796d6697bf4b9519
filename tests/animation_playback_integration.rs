//! Playback integration tests: world time, character state, and the sprite
//! frame the engine would draw.

use bevy_ecs::prelude::*;

use spritetable::bootstrap::{animation_schedule, boot, build_world, BootVariant};
use spritetable::components::animation::{animated_sprite, Animation, CharacterState};
use spritetable::components::sprite::Sprite;
use spritetable::resources::animationstore::{AnimationKey, AnimationStore};
use spritetable::resources::gameconfig::GameConfig;
use spritetable::resources::spritesheet::{Direction, FrameRect};
use spritetable::systems::time::update_world_time;

const WALK_RIGHT: [FrameRect; 3] = [
    FrameRect::new(291, 44, 16, 16),
    FrameRect::new(304, 44, 16, 16),
    FrameRect::new(320, 44, 16, 16),
];

fn make_world() -> World {
    let flags = boot(&GameConfig::new()).unwrap();
    build_world(&flags, 1.0)
}

fn spawn(world: &mut World, character: &str, action: &str, direction: Direction) -> Entity {
    let store = world.resource::<AnimationStore>().clone();
    let bundle =
        animated_sprite(&store, CharacterState::new(character, action, direction)).unwrap();
    world.spawn(bundle).id()
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

fn source(world: &World, entity: Entity) -> FrameRect {
    world.get::<Sprite>(entity).unwrap().source
}

#[test]
fn walking_cycles_through_frames() {
    let mut world = make_world();
    let mut schedule = animation_schedule();
    let mario = spawn(&mut world, "mario", "walking", Direction::Right);
    assert_eq!(source(&world, mario), WALK_RIGHT[0]);

    let mut seen = Vec::new();
    for _ in 0..6 {
        tick(&mut world, &mut schedule, 0.25);
        seen.push(source(&world, mario));
    }

    assert_eq!(
        seen,
        vec![
            WALK_RIGHT[1],
            WALK_RIGHT[2],
            WALK_RIGHT[0],
            WALK_RIGHT[1],
            WALK_RIGHT[2],
            WALK_RIGHT[0],
        ]
    );
}

#[test]
fn sub_frame_ticks_accumulate() {
    let mut world = make_world();
    let mut schedule = animation_schedule();
    let mario = spawn(&mut world, "mario", "walking", Direction::Right);

    tick(&mut world, &mut schedule, 0.125);
    assert_eq!(source(&world, mario), WALK_RIGHT[0]);
    tick(&mut world, &mut schedule, 0.125);
    assert_eq!(source(&world, mario), WALK_RIGHT[1]);
}

#[test]
fn state_change_restarts_new_animation() {
    let mut world = make_world();
    let mut schedule = animation_schedule();
    let mario = spawn(&mut world, "mario", "walking", Direction::Right);

    tick(&mut world, &mut schedule, 0.5);
    assert_eq!(source(&world, mario), WALK_RIGHT[2]);

    world
        .get_mut::<CharacterState>(mario)
        .unwrap()
        .set_action("jumping");
    tick(&mut world, &mut schedule, 0.125);

    let animation = world.get::<Animation>(mario).unwrap();
    assert_eq!(
        animation.key,
        AnimationKey::new("mario", "jumping", Direction::Right)
    );
    assert_eq!(animation.elapsed_time, 0.125);
    assert_eq!(source(&world, mario), FrameRect::new(355, 44, 16, 16));
}

#[test]
fn turning_around_switches_frame_set() {
    let mut world = make_world();
    let mut schedule = animation_schedule();
    let mario = spawn(&mut world, "mario", "standing", Direction::Right);

    tick(&mut world, &mut schedule, 0.1);
    assert_eq!(source(&world, mario), FrameRect::new(275, 44, 16, 16));

    world
        .get_mut::<CharacterState>(mario)
        .unwrap()
        .face(Direction::Left);
    tick(&mut world, &mut schedule, 0.1);
    assert_eq!(source(&world, mario), FrameRect::new(222, 44, 16, 16));
}

#[test]
fn reasserting_same_state_keeps_elapsed_time() {
    let mut world = make_world();
    let mut schedule = animation_schedule();
    let mario = spawn(&mut world, "mario", "walking", Direction::Right);

    tick(&mut world, &mut schedule, 0.25);
    world
        .get_mut::<CharacterState>(mario)
        .unwrap()
        .set_action("walking");
    tick(&mut world, &mut schedule, 0.25);

    assert_eq!(world.get::<Animation>(mario).unwrap().elapsed_time, 0.5);
    assert_eq!(source(&world, mario), WALK_RIGHT[2]);
}

#[test]
fn unknown_animation_leaves_sprite_unchanged() {
    let mut world = make_world();
    let mut schedule = animation_schedule();
    let ghost = world
        .spawn((
            Animation::new(AnimationKey::new("mario", "flying", Direction::Left)),
            Sprite::new("graphics/characters.gif", FrameRect::new(1, 2, 3, 4)),
        ))
        .id();

    tick(&mut world, &mut schedule, 0.25);

    assert_eq!(source(&world, ghost), FrameRect::new(1, 2, 3, 4));
    assert_eq!(world.get::<Animation>(ghost).unwrap().elapsed_time, 0.25);
}

#[test]
fn time_scale_slows_playback() {
    let flags = boot(&GameConfig::new()).unwrap();
    let mut world = build_world(&flags, 0.5);
    let mut schedule = animation_schedule();
    let mario = spawn(&mut world, "mario", "walking", Direction::Right);

    tick(&mut world, &mut schedule, 0.25);
    assert_eq!(source(&world, mario), WALK_RIGHT[0]);
    tick(&mut world, &mut schedule, 0.25);
    assert_eq!(source(&world, mario), WALK_RIGHT[1]);
}

#[test]
fn many_sprites_share_one_table() {
    let mut world = make_world();
    let mut schedule = animation_schedule();
    let a = spawn(&mut world, "mario", "walking", Direction::Right);
    let b = spawn(&mut world, "mario", "walking", Direction::Left);

    tick(&mut world, &mut schedule, 0.25);

    assert_eq!(source(&world, a), WALK_RIGHT[1]);
    assert_eq!(source(&world, b), FrameRect::new(193, 44, 16, 16));
}

#[test]
fn tileset_world_runs_without_table() {
    let mut config = GameConfig::new();
    config.variant = BootVariant::TileSet;
    let mut world = build_world(&boot(&config).unwrap(), 1.0);
    let mut schedule = animation_schedule();
    let entity = world
        .spawn((
            Animation::new(AnimationKey::new("mario", "walking", Direction::Right)),
            Sprite::new("graphics/characters.gif", WALK_RIGHT[0]),
        ))
        .id();

    tick(&mut world, &mut schedule, 0.25);

    assert_eq!(source(&world, entity), WALK_RIGHT[0]);
}
