/*
 * Color Module
 *
 * Hue/saturation/brightness color on a 0-255 scale per channel. The hue
 * channel is a wheel: values past either end wrap around, so an aging
 * particle can keep shifting its hue below zero.
 */

use nannou::color::{hsva, Hsva};

/// Upper bound of every channel.
pub const CHANNEL_LIMIT: f32 = 255.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsbColor {
    hue: f32,
    saturation: f32,
    brightness: f32,
}

impl HsbColor {
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        let mut color = Self {
            hue: 0.0,
            saturation: 0.0,
            brightness: 0.0,
        };
        color.set_hue(hue);
        color.set_saturation(saturation);
        color.set_brightness(brightness);
        color
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    // Hue wraps around the wheel instead of clamping
    pub fn set_hue(&mut self, hue: f32) {
        self.hue = hue.rem_euclid(CHANNEL_LIMIT);
    }

    pub fn set_saturation(&mut self, saturation: f32) {
        self.saturation = saturation.clamp(0.0, CHANNEL_LIMIT);
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, CHANNEL_LIMIT);
    }

    /// Convert to a nannou color with the given opacity (0-255).
    pub fn to_hsva(&self, opacity: f32) -> Hsva {
        hsva(
            self.hue / CHANNEL_LIMIT,
            self.saturation / CHANNEL_LIMIT,
            self.brightness / CHANNEL_LIMIT,
            opacity.clamp(0.0, CHANNEL_LIMIT) / CHANNEL_LIMIT,
        )
    }
}

impl Default for HsbColor {
    fn default() -> Self {
        Self::new(0.0, 0.0, CHANNEL_LIMIT)
    }
}
