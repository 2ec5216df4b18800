use super::{BodyId, RenderNode, SceneGraphError, SolarSystem};
use nalgebra::{Vector2, Vector3};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

/// Declarative description of a body tree, read from a JSON scene file.
///
/// Angles are written in degrees and revolutions as signed seconds per
/// revolution; both are converted when the tree is assembled.
#[derive(Debug, Deserialize)]
pub struct SystemDescription {
    pub bodies: Vec<BodyDescription>,
}

#[derive(Debug, Deserialize)]
pub struct BodyDescription {
    pub name: String,
    pub scale: f32,

    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),

    /// Path of a texture image; a procedural surface is generated from
    /// `color` when absent.
    #[serde(default)]
    pub texture: Option<String>,

    #[serde(default)]
    pub spin: Option<SpinDescription>,

    #[serde(default)]
    pub orbit: Option<OrbitDescription>,

    #[serde(default)]
    pub ring: Option<RingDescription>,

    #[serde(default)]
    pub satellites: Vec<BodyDescription>,
}

#[derive(Debug, Deserialize)]
pub struct SpinDescription {
    /// Tilt of the spin axis in degrees.
    #[serde(default)]
    pub axial_tilt: f32,
    /// Signed seconds per revolution.
    pub period: f32,
}

#[derive(Debug, Deserialize)]
pub struct OrbitDescription {
    pub radius: f32,
    /// Tilt of the orbit plane in degrees.
    #[serde(default)]
    pub inclination: f32,
    /// Signed seconds per revolution.
    pub period: f32,
}

#[derive(Debug, Deserialize)]
pub struct RingDescription {
    pub scale: (f32, f32),

    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
}

fn default_color() -> (f32, f32, f32) {
    (0.8, 0.8, 0.8)
}

impl SystemDescription {
    pub fn from_path(path: &Path) -> Result<SystemDescription, Box<std::error::Error>> {
        let content = fs::read_to_string(path)?;
        SystemDescription::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<SystemDescription, Box<std::error::Error>> {
        let description: SystemDescription = serde_json::from_str(content)?;
        for body in &description.bodies {
            body.validate()?;
        }
        Ok(description)
    }

    /// Builds the described bodies into `system` and returns the ids of the
    /// top-level bodies. Render nodes come from the caller: `make_body` for
    /// body geometry, `make_ring` for ring geometry.
    pub fn assemble<N, F, G>(
        &self,
        system: &mut SolarSystem<N>,
        make_body: &mut F,
        make_ring: &mut G,
    ) -> Result<Vec<BodyId>, SceneGraphError>
    where
        N: RenderNode,
        F: FnMut(&BodyDescription) -> N,
        G: FnMut(&RingDescription) -> N,
    {
        self.bodies
            .iter()
            .map(|body| assemble_body(body, system, make_body, make_ring))
            .collect()
    }
}

impl BodyDescription {
    fn validate(&self) -> Result<(), Box<std::error::Error>> {
        if let Some(ref spin) = self.spin {
            if spin.period == 0.0 {
                return Err(format!("body '{}' has a zero spin period", self.name).into());
            }
        }
        if let Some(ref orbit) = self.orbit {
            if orbit.period == 0.0 {
                return Err(format!("body '{}' has a zero orbit period", self.name).into());
            }
        }
        for satellite in &self.satellites {
            satellite.validate()?;
        }
        Ok(())
    }
}

fn assemble_body<N, F, G>(
    description: &BodyDescription,
    system: &mut SolarSystem<N>,
    make_body: &mut F,
    make_ring: &mut G,
) -> Result<BodyId, SceneGraphError>
where
    N: RenderNode,
    F: FnMut(&BodyDescription) -> N,
    G: FnMut(&RingDescription) -> N,
{
    let id = system.add_body(make_body(description));

    {
        let body = system.body_mut(id);
        body.set_scale(Vector3::new(
            description.scale,
            description.scale,
            description.scale,
        ));
        if let Some(ref spin) = description.spin {
            body.configure_spin(spin.axial_tilt.to_radians(), angular_speed(spin.period));
        }
        if let Some(ref orbit) = description.orbit {
            body.configure_orbit(
                orbit.radius,
                orbit.inclination.to_radians(),
                angular_speed(orbit.period),
            );
        }
        if let Some(ref ring) = description.ring {
            body.set_ring(make_ring(ring), Vector2::new(ring.scale.0, ring.scale.1));
        }
    }
    debug!("added body '{}'", description.name);

    for satellite in &description.satellites {
        let satellite_id = assemble_body(satellite, system, make_body, make_ring)?;
        system.add_child(id, satellite_id)?;
    }

    Ok(id)
}

/// Signed seconds per revolution into radians per second.
fn angular_speed(period: f32) -> f32 {
    2.0 * PI / period
}

#[cfg(test)]
mod tests {
    use super::super::testing::{DrawLog, RecordingNode};
    use super::*;

    const SCENE: &str = r#"{
        "bodies": [{
            "name": "sun",
            "scale": 1.0,
            "color": [1.0, 0.8, 0.3],
            "spin": { "period": 6.0 },
            "satellites": [
                {
                    "name": "earth",
                    "scale": 0.05,
                    "spin": { "axial_tilt": -23.0, "period": 3.0 },
                    "orbit": { "radius": 4.0, "inclination": -7.2, "period": 20.0 },
                    "satellites": [{
                        "name": "moon",
                        "scale": 0.01,
                        "orbit": { "radius": 0.2, "inclination": 29.0, "period": 1.3 }
                    }]
                },
                {
                    "name": "saturn",
                    "scale": 0.4,
                    "orbit": { "radius": 16.0, "inclination": -5.5, "period": 400.0 },
                    "ring": { "scale": [1.0, 1.25] }
                }
            ]
        }]
    }"#;

    #[test]
    fn parses_a_nested_scene_file() {
        let description = SystemDescription::from_json(SCENE).unwrap();
        assert_eq!(description.bodies.len(), 1);

        let sun = &description.bodies[0];
        assert_eq!(sun.name, "sun");
        assert_eq!(sun.satellites.len(), 2);
        assert!(sun.orbit.is_none());

        let earth = &sun.satellites[0];
        assert_eq!(earth.satellites[0].name, "moon");
        assert!(sun.satellites[1].ring.is_some());
    }

    #[test]
    fn rejects_a_zero_period() {
        let broken = r#"{
            "bodies": [{
                "name": "frozen",
                "scale": 1.0,
                "spin": { "period": 0.0 }
            }]
        }"#;
        assert!(SystemDescription::from_json(broken).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(SystemDescription::from_json("{ \"bodies\": [").is_err());
    }

    #[test]
    fn assembles_the_described_tree() {
        let description = SystemDescription::from_json(SCENE).unwrap();
        let log = DrawLog::default();
        let mut system = SolarSystem::new();

        let roots = description
            .assemble(
                &mut system,
                &mut |body: &BodyDescription| RecordingNode::new(&body.name, &log),
                &mut |_ring: &RingDescription| RecordingNode::new("ring", &log),
            )
            .unwrap();

        assert_eq!(roots.len(), 1);
        assert_eq!(system.len(), 4);

        let sun = roots[0];
        assert_eq!(system.body(sun).children().len(), 2);

        let earth = system.body(sun).children()[0];
        let orbit = *system.body(earth).orbit();
        assert!((orbit.radius - 4.0).abs() < 1e-6);
        assert!((orbit.inclination - (-7.2f32).to_radians()).abs() < 1e-6);
        assert!((orbit.speed - 2.0 * PI / 20.0).abs() < 1e-6);
        assert_eq!(orbit.rotation_angle(), 0.0);

        let spin = *system.body(earth).spin();
        assert!((spin.axial_tilt - (-23.0f32).to_radians()).abs() < 1e-6);
        assert!((spin.speed - 2.0 * PI / 3.0).abs() < 1e-6);

        let moon = system.body(earth).children()[0];
        assert!(system.body(moon).children().is_empty());
    }

    #[test]
    fn angular_speed_follows_the_period_sign() {
        assert!((angular_speed(4.0) - PI / 2.0).abs() < 1e-6);
        assert!((angular_speed(-600.0) + 2.0 * PI / 600.0).abs() < 1e-6);
    }
}
