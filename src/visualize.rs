use bevy::prelude::*;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

use crate::avatar::Avatar;
use crate::config::AvatarConfig;
use crate::pacing::FrameClock;
use crate::render::{draw_frame, Renderer};
use crate::types::*;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Resource)]
pub struct AppGlobalData {
    pub avatar: Avatar,
    pub clock: FrameClock,
    pub offset: Position,
    pub debug_text: bool,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn visualize_avatar(avatar: Avatar, config: &AvatarConfig) {
    App::new()
        .insert_resource(AppGlobalData {
            avatar,
            clock: FrameClock::new(config.frame_budget()),
            offset: config.offset(),
            debug_text: false,
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kinect 3D avatar".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PanOrbitCameraPlugin)
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (draw_avatar, update_main, update_debug_text, bevy::window::close_on_esc),
        )
        .run();
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// A unit struct to help identify the debug UI component, since there may be many Text components
#[derive(Component)]
struct DebugText;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn setup(mut commands: Commands, appdata: Res<AppGlobalData>) {
    //// Orbit camera, looking at where the skeleton stands
    let focus = to_vec3(appdata.offset);
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(focus.x, focus.y + 2.5, focus.z - 16.).looking_at(focus, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            focus,
            ..default()
        },
    ));

    // draw instructions
    commands.spawn(
        TextBundle::from_section(
            "Press 'Space' to pause or resume\n\
            Press 'Left' or 'Right' to step frames\n\
            Press 'D' to toggle debug text\n\
            Hold 'Up' or 'Down' to change the line width of gizmos\n\
            Press 'Escape' to quit\n",
            TextStyle {
                font_size: 15.,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        }),
    );

    // draw debug text
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 17.,
                color: Color::rgba(1.0, 1.0, 1.0, 0.5),
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
        DebugText,
    ));
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn to_vec3(position: Position) -> Vec3 {
    Vec3::new(position.x as f32, position.y as f32, position.z as f32)
}

fn to_color(rgb: Rgb) -> Color {
    Color::rgb(rgb[0], rgb[1], rgb[2])
}

/// Number of lines a limb's mantle is drawn with.
const LIMB_SIDES: usize = 8;

/// Draws the avatar with bevy's immediate mode gizmos.
struct GizmoRenderer<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
}

impl Renderer for GizmoRenderer<'_, '_, '_> {
    fn draw_joint_marker(&mut self, position: Position, radius: f32, color: Rgb) {
        self.gizmos
            .sphere(to_vec3(position), Quat::IDENTITY, radius, to_color(color));
    }

    fn draw_limb_segment(&mut self, a: Position, b: Position, base_radius: f32, tip_radius: f32, color: Rgb) {
        let (a, b) = (to_vec3(a), to_vec3(b));
        let color = to_color(color);
        let axis = (b - a).normalize_or_zero();
        if axis == Vec3::ZERO {
            return;
        }
        let (u, v) = axis.any_orthonormal_pair();

        //// mantle lines plus the rims at both ends
        let ring = |center: Vec3, radius: f32, k: usize| {
            let angle = k as f32 / LIMB_SIDES as f32 * std::f32::consts::TAU;
            center + (u * angle.cos() + v * angle.sin()) * radius
        };
        for k in 0..LIMB_SIDES {
            self.gizmos.line(ring(a, base_radius, k), ring(b, tip_radius, k), color);
            self.gizmos.line(ring(a, base_radius, k), ring(a, base_radius, k + 1), color);
            self.gizmos.line(ring(b, tip_radius, k), ring(b, tip_radius, k + 1), color);
        }
    }

    /// 10x10 unit grid on the floor, the edges along the x and z axes tinted.
    fn draw_ground_grid(&mut self) {
        let grey = Color::rgb(0.25, 0.25, 0.25);
        for i in 0..=10 {
            let i = i as f32;
            let (along_z, along_x) = if i == 0.0 {
                (Color::rgb(0.6, 0.3, 0.3), Color::rgb(0.3, 0.3, 0.6))
            } else {
                (grey, grey)
            };
            self.gizmos.line(Vec3::new(i, 0., 0.), Vec3::new(i, 0., 10.), along_z);
            self.gizmos.line(Vec3::new(0., 0., i), Vec3::new(10., 0., i), along_x);
        }
    }

    /// Axes with arrow heads: x blue, y red, z green.
    fn draw_axis_gizmo(&mut self) {
        let axes = [
            (Vec3::X, Vec3::Y * 0.2, Color::BLUE),
            (Vec3::Y, Vec3::new(0.1, 0., -0.1), Color::RED),
            (Vec3::Z, Vec3::Y * 0.2, Color::GREEN),
        ];
        for (axis, barb, color) in axes {
            let tip = axis * 4.0;
            self.gizmos.line(axis * -1.0, tip, color);
            self.gizmos.line(tip, axis * 3.75 + barb, color);
            self.gizmos.line(tip, axis * 3.75 - barb, color);
        }
    }

    fn draw_bone_strip(&mut self, points: &[Position], color: Rgb) {
        self.gizmos
            .linestrip(points.iter().map(|&point| to_vec3(point)), to_color(color));
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn draw_avatar(mut gizmos: Gizmos, appdata: Res<AppGlobalData>) {
    let mut renderer = GizmoRenderer { gizmos: &mut gizmos };
    draw_frame(&mut renderer, appdata.avatar.current_pose(), appdata.offset);
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn update_main(
    mut config_store: ResMut<GizmoConfigStore>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut appdata: ResMut<AppGlobalData>,
) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    if keyboard.pressed(KeyCode::ArrowUp) {
        config.line_width += 5. * time.delta_seconds();
        config.line_width = config.line_width.clamp(0., 50.);
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        config.line_width -= 5. * time.delta_seconds();
        config.line_width = config.line_width.clamp(0., 50.);
    }

    if keyboard.just_released(KeyCode::KeyD) {
        appdata.debug_text = !appdata.debug_text;
    }

    if let Some(playback) = appdata.avatar.playback_mut() {
        if keyboard.just_released(KeyCode::Space) {
            playback.toggle_playing();
        }
        if keyboard.just_released(KeyCode::ArrowRight) {
            playback.step_forward();
        }
        if keyboard.just_released(KeyCode::ArrowLeft) {
            playback.step_backward();
        }
    }

    let due = appdata.clock.tick(time.delta());
    appdata.avatar.advance_by(due);
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn update_debug_text(mut query: Query<&mut Text, With<DebugText>>, appdata: Res<AppGlobalData>) {
    let mut t: String = appdata.avatar.describe();
    t += "\n";
    t += "=============== JOINT POSITIONS ===============\n";
    for (joint_type, joint) in appdata.avatar.current_pose().iter() {
        t += &format!("{:.<20} {: ^40}\n", joint_type.name(), format!("{:6.2?}", joint.position));
    }
    for mut text in &mut query {
        if appdata.debug_text {
            text.sections[0].value = t.clone();
        } else {
            text.sections[0].value = "".to_string();
        }
    }
}
