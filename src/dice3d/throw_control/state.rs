//! Throw Control State
//!
//! The bounded input region: maps pointer coordinates into a centered
//! sub-rectangle of the viewport, projects them onto the horizontal play
//! plane and builds the boundary geometry around that area.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::dice3d::geometry::{build_boundary, intersect_line_plane, BoundaryCorners, BoundaryMesh};
use crate::dice3d::types::{BoundaryShape, RegionSettings};

/// Screen-to-world conversion provided by a camera.
pub trait ScreenProjector {
    /// Viewport size in screen units.
    fn viewport_size(&self) -> Vec2;

    fn camera_position(&self) -> Vec3;

    /// World point `depth` units from the camera along the ray through
    /// `screen`.
    fn screen_to_world(&self, screen: Vec2, depth: f32) -> Option<Vec3>;

    /// World ray through `screen`.
    fn screen_ray(&self, screen: Vec2) -> Option<Ray3d> {
        let origin = self.camera_position();
        let through = self.screen_to_world(screen, 1.0)?;
        let direction = Dir3::new(through - origin).ok()?;
        Some(Ray3d { origin, direction })
    }
}

/// A centered sub-rectangle of the viewport mapped onto the play plane.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BoundedRegion {
    width_percentage: f32,
    height_percentage: f32,
    pub plane_height: f32,
    pub projection_depth: f32,
}

impl Default for BoundedRegion {
    fn default() -> Self {
        Self::from_settings(&RegionSettings::default())
    }
}

impl BoundedRegion {
    /// Percentages are clamped to `0..=100`.
    pub fn new(width_percentage: f32, height_percentage: f32, plane_height: f32) -> Self {
        Self {
            width_percentage: width_percentage.clamp(0.0, 100.0),
            height_percentage: height_percentage.clamp(0.0, 100.0),
            plane_height,
            projection_depth: RegionSettings::default().projection_depth,
        }
    }

    pub fn from_settings(settings: &RegionSettings) -> Self {
        Self {
            projection_depth: settings.projection_depth,
            ..Self::new(
                settings.width_percentage,
                settings.height_percentage,
                settings.plane_height,
            )
        }
    }

    pub fn width_percentage(&self) -> f32 {
        self.width_percentage
    }

    pub fn height_percentage(&self) -> f32 {
        self.height_percentage
    }

    /// Both percentages zero means the whole viewport is usable.
    pub fn is_unbounded(&self) -> bool {
        self.width_percentage == 0.0 && self.height_percentage == 0.0
    }

    /// The usable rectangle in screen coordinates.
    pub fn screen_bounds(&self, viewport: Vec2) -> Rect {
        let half_width = 0.5 + self.width_percentage / 200.0;
        let half_height = 0.5 + self.height_percentage / 200.0;
        Rect::new(
            viewport.x * (1.0 - half_width),
            viewport.y * (1.0 - half_height),
            viewport.x * half_width,
            viewport.y * half_height,
        )
    }

    /// Clamp a raw pointer coordinate into the usable rectangle.
    pub fn clamp_screen_point(&self, raw: Vec2, viewport: Vec2) -> Vec2 {
        if self.is_unbounded() {
            return raw;
        }
        let bounds = self.screen_bounds(viewport);
        raw.clamp(bounds.min, bounds.max)
    }

    fn plane_point(&self) -> Vec3 {
        Vec3::new(0.0, self.plane_height, 0.0)
    }

    /// Project a screen coordinate onto the play plane.
    ///
    /// Falls back to the unprojected world point when the view ray runs
    /// parallel to the plane, and to `None` only if the camera cannot
    /// unproject the coordinate at all.
    pub fn project(&self, screen: Vec2, projector: &impl ScreenProjector) -> Option<Vec3> {
        let world = projector.screen_to_world(screen, self.projection_depth)?;
        Some(
            intersect_line_plane(projector.camera_position(), world, self.plane_point(), Vec3::Y)
                .unwrap_or(world),
        )
    }

    /// Clamp the pointer into the region and project it onto the play plane.
    pub fn clamped_point(&self, raw: Vec2, projector: &impl ScreenProjector) -> Option<Vec3> {
        let clamped = self.clamp_screen_point(raw, projector.viewport_size());
        self.project(clamped, projector)
    }

    /// The viewport center projected onto the play plane.
    pub fn center_point(&self, projector: &impl ScreenProjector) -> Option<Vec3> {
        self.project(projector.viewport_size() / 2.0, projector)
    }

    /// Screen corners of the region: left-down, left-up, right-up, right-down.
    pub fn screen_corners(&self, viewport: Vec2) -> [Vec2; 4] {
        let bounds = if self.is_unbounded() {
            Rect::from_corners(Vec2::ZERO, viewport)
        } else {
            self.screen_bounds(viewport)
        };
        [
            Vec2::new(bounds.min.x, bounds.min.y),
            Vec2::new(bounds.min.x, bounds.max.y),
            Vec2::new(bounds.max.x, bounds.max.y),
            Vec2::new(bounds.max.x, bounds.min.y),
        ]
    }

    /// World-space corner data of the region.
    pub fn corners(&self, projector: &impl ScreenProjector) -> Option<BoundaryCorners> {
        let camera = projector.camera_position();
        let mut on_plane = [Vec3::ZERO; 4];
        let mut rays = [Vec3::ZERO; 4];

        let screen_corners = self.screen_corners(projector.viewport_size());
        for (i, screen) in screen_corners.into_iter().enumerate() {
            let world = projector.screen_to_world(screen, self.projection_depth)?;
            on_plane[i] = intersect_line_plane(camera, world, self.plane_point(), Vec3::Y)
                .unwrap_or(world);
            rays[i] = (world - camera).try_normalize()?;
        }

        Some(BoundaryCorners {
            camera,
            on_plane,
            rays,
        })
    }

    /// Build the boundary mesh around the region.
    pub fn boundary_geometry(
        &self,
        projector: &impl ScreenProjector,
        shape: &BoundaryShape,
    ) -> Option<BoundaryMesh> {
        let corners = self.corners(projector)?;
        Some(build_boundary(&corners, shape))
    }
}

/// Where the pointer maps to this frame, shared with the dice systems.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PointerTarget {
    /// Raw cursor position, if the cursor is inside the window.
    pub cursor: Option<Vec2>,
    /// Clamped pointer projected onto the play plane.
    pub target: Option<Vec3>,
    /// Projected viewport center, used by automatic rolls.
    pub center: Option<Vec3>,
    pub held: bool,
}
