use backdrop::{
    Frame, FrameTarget, MountPoint, SceneDirector, SceneError, SceneSettings, Viewport,
};
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};

/// Records what each draw call saw.
#[derive(Default)]
struct Recorder {
    frames: usize,
    camera_xy: Vec<(f64, f64)>,
    first_particles: Option<Vec<Vec3>>,
    particles_changed: bool,
    fail_at: Option<usize>,
    size: Option<Viewport>,
}

impl FrameTarget for Recorder {
    fn resize(&mut self, viewport: Viewport) {
        self.size = Some(viewport);
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SceneError> {
        self.frames += 1;
        if self.fail_at == Some(self.frames) {
            return Err(SceneError::draw("context lost"));
        }

        self.camera_xy
            .push((frame.camera.position.x, frame.camera.position.y));

        let points = frame.scene.particles.positions();
        match &self.first_particles {
            None => self.first_particles = Some(points.to_vec()),
            Some(first) => self.particles_changed |= first.as_slice() != points,
        }
        Ok(())
    }
}

struct Page {
    fail_at: Option<usize>,
}

impl MountPoint for Page {
    type Target = Recorder;

    fn attach(self, viewport: Viewport) -> Result<Recorder, SceneError> {
        Ok(Recorder {
            fail_at: self.fail_at,
            size: Some(viewport),
            ..Recorder::default()
        })
    }
}

fn start(fail_at: Option<usize>) -> SceneDirector<Recorder> {
    SceneDirector::initialize(
        Some(Page { fail_at }),
        Viewport::new(1024, 768),
        SceneSettings::default(),
        &mut StdRng::seed_from_u64(2024),
    )
    .expect("scene should initialize")
}

#[test]
fn thousand_frames_with_pointer_in_corner() {
    let mut director = start(None);
    let bounds = director.settings().bodies.bounds;

    // Top-right corner of a 1024x768 viewport is (1, 1).
    let pointer = director.on_pointer_move(1024.0, 0.0);
    assert_eq!((pointer.x, pointer.y), (1.0, 1.0));

    for _ in 0..1000 {
        let before: Vec<_> = director.scene().bodies.clone();
        director.tick().unwrap();

        for (old, body) in before.iter().zip(&director.scene().bodies) {
            let slack = bounds.half_extents + old.velocity.abs() + Vec3::splat(1e-4);
            assert!(
                body.position.abs().cmple(slack).all(),
                "body escaped: {:?}",
                body.position
            );
        }
    }

    let camera = director.camera();
    assert!((camera.position.x - 5.0).abs() < 1e-6);
    assert!((camera.position.y - 5.0).abs() < 1e-6);
    assert_eq!(camera.position.z, 15.0);

    let recorder = director.surface().target();
    assert_eq!(recorder.frames, 1000);
    assert_eq!(recorder.size, Some(Viewport::new(1024, 768)));
    assert_eq!(recorder.first_particles.as_ref().map(Vec::len), Some(2000));
    assert!(!recorder.particles_changed);

    // Easing never overshoots the target.
    assert!(recorder
        .camera_xy
        .windows(2)
        .all(|w| w[1].0 >= w[0].0 && w[1].0 <= 5.0));
}

#[test]
fn globe_and_starfield_accumulate_fixed_increments() {
    let mut director = start(None);
    for _ in 0..300 {
        director.tick().unwrap();
    }

    let scene = director.scene();
    assert!((scene.globe.rotation_y() - 300.0 * 0.002).abs() < 1e-9);
    assert!((scene.particles.rotation_y() - 300.0 * 0.001).abs() < 1e-9);
}

#[test]
fn draw_failure_stops_the_loop() {
    let mut director = start(Some(5));

    let mut completed = 0;
    let err = loop {
        match director.tick() {
            Ok(()) => completed += 1,
            Err(err) => break err,
        }
    };

    assert_eq!(completed, 4);
    assert!(matches!(err, SceneError::Draw(_)));
}

#[test]
fn resize_then_pointer_uses_new_viewport() {
    let mut director = start(None);
    director.on_resize(Viewport::new(400, 200));

    let pointer = director.on_pointer_move(200.0, 100.0);
    assert_eq!((pointer.x, pointer.y), (0.0, 0.0));
    assert!((director.camera().aspect - 2.0).abs() < 1e-6);
}
