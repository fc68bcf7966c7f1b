//! Rendering.
//!
//! The simulation never touches raylib's draw calls directly. Instead
//! [`draw_list`] turns the world into an ordered list of [`DrawCommand`]s
//! (texture key, sheet frame, destination, flip, flash), which
//! [`render_system`] then executes inside raylib's drawing scopes. Keeping the
//! list pure lets headless runs and tests inspect what would be drawn.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::gameobject::GameObject;
use crate::components::layer::Layer;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::systems::bullet;

/// One sprite to draw, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: &'static str,
    /// Frame rectangle in the sprite sheet.
    pub source: Rectangle,
    pub dest: Rectangle,
    pub flip_h: bool,
    pub flash: bool,
    pub layer: Layer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outline {
    Collider,
    GroundSensor,
}

fn command_for(obj: &GameObject, layer: Layer) -> Option<DrawCommand> {
    let texture = obj.texture?;
    if bullet::is_inactive(obj) {
        return None;
    }
    let w = obj.sprite_size.x;
    let h = obj.sprite_size.y;
    Some(DrawCommand {
        texture,
        source: Rectangle::new(obj.frame() as f32 * w, 0.0, w, h),
        dest: Rectangle::new(obj.position.x, obj.position.y, w, h),
        flip_h: obj.direction < 0.0,
        flash: obj.flash,
        layer,
    })
}

/// Build draw commands for every visible object, in draw order.
///
/// Layers are drawn back to front; inside a layer objects keep entity order.
pub fn collect_draw_commands<'a>(
    objects: impl IntoIterator<Item = (Entity, &'a GameObject, &'a Layer)>,
) -> Vec<DrawCommand> {
    let mut keyed: Vec<(Layer, Entity, DrawCommand)> = objects
        .into_iter()
        .filter_map(|(entity, obj, layer)| {
            command_for(obj, *layer).map(|cmd| (*layer, entity, cmd))
        })
        .collect();
    keyed.sort_by_key(|(layer, entity, _)| (*layer, *entity));
    keyed.into_iter().map(|(_, _, cmd)| cmd).collect()
}

pub fn draw_list(world: &mut World) -> Vec<DrawCommand> {
    let mut query = world.query::<(Entity, &GameObject, &Layer)>();
    collect_draw_commands(query.iter(world))
}

/// Collider outlines and the player's ground sensor, for debug mode.
pub fn collect_debug_outlines<'a>(
    objects: impl IntoIterator<Item = &'a GameObject>,
) -> Vec<(Rectangle, Outline)> {
    let mut outlines = Vec::new();
    for obj in objects {
        if !obj.has_collider() {
            continue;
        }
        outlines.push((obj.world_collider(), Outline::Collider));
        if obj.player().is_some() {
            outlines.push((obj.collider.ground_probe(obj.position), Outline::GroundSensor));
        }
    }
    outlines
}

pub fn debug_outlines(world: &mut World) -> Vec<(Rectangle, Outline)> {
    let mut query = world.query::<&GameObject>();
    collect_debug_outlines(query.iter(world))
}

fn placeholder_color(layer: Layer) -> Color {
    match layer {
        Layer::Background => Color::DARKGRAY,
        Layer::Level => Color::GRAY,
        Layer::Characters => Color::SKYBLUE,
        Layer::Bullets => Color::YELLOW,
        Layer::Foreground => Color::DARKGREEN,
    }
}

fn draw_command<D: RaylibDraw>(d: &mut D, cmd: &DrawCommand, textures: &TextureStore) {
    let tint = if cmd.flash { Color::RED } else { Color::WHITE };
    match textures.get(cmd.texture) {
        Some(tex) => {
            let mut src = cmd.source;
            // Negative source width mirrors the frame in place.
            if cmd.flip_h {
                src.width = -src.width;
            }
            d.draw_texture_pro(tex, src, cmd.dest, Vector2::zero(), 0.0, tint);
        }
        None => {
            let color = if cmd.flash {
                Color::RED
            } else {
                placeholder_color(cmd.layer)
            };
            d.draw_rectangle_rec(cmd.dest, color);
        }
    }
}

/// Draw the world through the camera, then the debug overlay if enabled.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    camera: Res<Camera2DRes>,
    screen: Res<ScreenSize>,
    textures: Res<TextureStore>,
    debug: Option<Res<DebugMode>>,
    objects: Query<(Entity, &GameObject, &Layer)>,
) {
    let commands = collect_draw_commands(objects.iter());
    let outlines = if debug.is_some() {
        collect_debug_outlines(objects.iter().map(|(_, obj, _)| obj))
    } else {
        Vec::new()
    };

    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::new(40, 40, 56, 255));
    {
        let mut d2 = d.begin_mode2D(camera.0);
        for cmd in &commands {
            draw_command(&mut d2, cmd, &textures);
        }
        for (rect, outline) in &outlines {
            let color = match outline {
                Outline::Collider => Color::RED,
                Outline::GroundSensor => Color::GREEN,
            };
            d2.draw_rectangle_lines_ex(*rect, 1.0, color);
        }
    }

    if debug.is_some() {
        let text = format!(
            "DEBUG MODE (F11) | FPS: {} | objects: {} | camera ({:.1}, {:.1})",
            d.get_fps(),
            objects.iter().count(),
            camera.0.target.x,
            camera.0.target.y
        );
        d.draw_text(&text, 10, 10, 10, Color::WHITE);
        let view = camera.view_rect(*screen);
        let view_text = format!("view x {:.0}..{:.0}", view.x, view.x + view.width);
        d.draw_text(&view_text, 10, 24, 10, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::boxcollider::BoxCollider;
    use crate::components::gameobject::{ObjectKind, PlayerData};

    fn sprite(x: f32, texture: &'static str) -> GameObject {
        GameObject::new(ObjectKind::Level)
            .with_position(Vector2 { x, y: 10.0 })
            .with_texture(texture, Vector2 { x: 32.0, y: 32.0 })
    }

    #[test]
    fn test_draw_list_orders_by_layer() {
        let mut world = World::new();
        world.spawn((sprite(0.0, "grass"), Layer::Foreground));
        world.spawn((sprite(0.0, "ground"), Layer::Level));
        world.spawn((sprite(0.0, "brick"), Layer::Background));
        let list = draw_list(&mut world);
        let keys: Vec<&str> = list.iter().map(|c| c.texture).collect();
        assert_eq!(keys, vec!["brick", "ground", "grass"]);
    }

    #[test]
    fn test_source_frame_and_flip() {
        let mut world = World::new();
        let mut obj = sprite(64.0, "run").with_animations(vec![Animation::new(4, 1.0)], 0);
        obj.active_animation_mut().unwrap().step(0.5);
        obj.direction = -1.0;
        world.spawn((obj, Layer::Characters));

        let list = draw_list(&mut world);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].source, Rectangle::new(64.0, 0.0, 32.0, 32.0));
        assert_eq!(list[0].dest, Rectangle::new(64.0, 10.0, 32.0, 32.0));
        assert!(list[0].flip_h);
        assert!(!list[0].flash);
    }

    #[test]
    fn test_objects_without_texture_are_skipped() {
        let mut world = World::new();
        world.spawn((GameObject::new(ObjectKind::Level), Layer::Level));
        assert!(draw_list(&mut world).is_empty());
    }

    #[test]
    fn test_debug_outlines_include_ground_sensor() {
        let mut world = World::new();
        world.spawn((
            GameObject::new(ObjectKind::Player(PlayerData::new(0.8)))
                .with_collider(BoxCollider::new(10.0, 26.0)),
            Layer::Characters,
        ));
        world.spawn((
            GameObject::new(ObjectKind::Level).with_collider(BoxCollider::new(32.0, 32.0)),
            Layer::Level,
        ));
        let outlines = debug_outlines(&mut world);
        assert_eq!(outlines.len(), 3);
        assert!(outlines.contains(&(Rectangle::new(0.0, 26.0, 10.0, 1.0), Outline::GroundSensor)));
    }
}
