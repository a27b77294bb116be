use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::{ConfigResetNotification, EngineConfig, SaveConfigRequest};
use crate::objects::{ArObject, ObjectRegistry, SceneQueries};
use crate::placement::LastPlacement;

fn format_vec(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

#[allow(clippy::too_many_arguments)]
pub fn scene_panel_ui(
    mut contexts: EguiContexts,
    registry: Res<ObjectRegistry>,
    objects: Query<&ArObject>,
    scene: SceneQueries,
    last: Res<LastPlacement>,
    mut config: ResMut<EngineConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::SidePanel::left("scene_panel")
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Objects").heading().size(18.0));
            ui.separator();

            if registry.is_empty() {
                ui.label(egui::RichText::new("Press 1, 2 or 3 to place a shape").weak());
            }

            for registered in registry.iter() {
                let Ok(object) = objects.get(registered.entity) else {
                    continue;
                };
                let selected = registry.selected() == Some(registered.entity);
                let name = registered.name.as_deref().unwrap_or("unnamed");
                let text = format!("{} {}", name, format_vec(object.position));
                ui.label(if selected {
                    egui::RichText::new(text).strong()
                } else {
                    egui::RichText::new(text)
                });
            }

            if let Some(offset) = registry
                .selected()
                .and_then(|entity| scene.distance_from_camera(entity))
            {
                ui.add_space(4.0);
                ui.label(format!("Selected is {:.2} m away", offset.length()));
            }

            ui.add_space(8.0);
            ui.label(egui::RichText::new("Last placement").heading().size(14.0));
            ui.separator();
            match last.0 {
                Some(placement) => {
                    ui.label(format!("{:?}", placement.source));
                    ui.label(format_vec(placement.position));
                    ui.label(if placement.is_on_plane {
                        "on plane"
                    } else {
                        "off plane"
                    });
                }
                None => {
                    ui.label(egui::RichText::new("none yet").weak());
                }
            }

            ui.add_space(8.0);
            ui.label(egui::RichText::new("Simulator").heading().size(14.0));
            ui.separator();

            let simulator = &mut config.data.simulator;
            let mut changed = false;
            ui.horizontal(|ui| {
                ui.label("Feature points");
                changed |= ui
                    .add(egui::DragValue::new(&mut simulator.feature_point_count).range(0..=5000))
                    .changed();
            });
            ui.horizontal(|ui| {
                ui.label("Seed");
                changed |= ui.add(egui::DragValue::new(&mut simulator.seed)).changed();
            });
            ui.horizontal(|ui| {
                ui.label("Floor half size");
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut simulator.ground_half_extent)
                            .range(0.1..=10.0)
                            .speed(0.05),
                    )
                    .changed();
            });
            if changed {
                config.dirty = true;
            }

            ui.add_enabled_ui(config.dirty, |ui| {
                if ui.button("Save settings").clicked() {
                    save_events.write(SaveConfigRequest);
                }
            });
        });

    if reset_notification.show {
        egui::Window::new("Configuration Reset")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Your settings were reset to defaults.");
                if let Some(reason) = &reset_notification.reason {
                    ui.label(egui::RichText::new(reason).weak());
                }
                if ui.button("OK").clicked() {
                    reset_notification.show = false;
                    reset_notification.reason = None;
                }
            });
    }

    Ok(())
}
