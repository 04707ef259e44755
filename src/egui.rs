#![cfg(feature = "egui")]

use crate::{Backend, BlurPass};

impl<B: Backend> BlurPass<B> {
    /// Draws the blur settings.
    /// With a `group` name the controls are placed inside a collapsing header.
    pub fn ui(&mut self, ui: &mut egui::Ui, group: Option<&str>) {
        match group {
            Some(group) => {
                egui::CollapsingHeader::new(group).show(ui, |ui| self.controls(ui));
            }
            None => self.controls(ui),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let mut kernel_width = self.kernel_width();
        if ui
            .add(egui::Slider::new(&mut kernel_width, 1..=15).step_by(2.0).text("Kernel Width"))
            .changed()
        {
            self.set_kernel_width(kernel_width);
        }

        let mut spatial_sigma = self.spatial_sigma();
        if ui
            .add(egui::DragValue::new(&mut spatial_sigma).speed(0.001).prefix("Spatial Sigma "))
            .changed()
        {
            self.set_spatial_sigma(spatial_sigma);
        }

        let mut range_sigma = self.range_sigma();
        if ui
            .add(egui::DragValue::new(&mut range_sigma).speed(0.001).prefix("Range Sigma "))
            .changed()
        {
            self.set_range_sigma(range_sigma);
        }
    }
}
