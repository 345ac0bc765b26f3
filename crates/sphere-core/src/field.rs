use glam::Vec3;

use crate::sampler::SphereSampler;
use crate::spectrum::{Hsl, SpectrumMapper, SpectrumSnapshot};

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    initial: Vec3,
    pub(crate) current: Vec3,
    pub(crate) color: Hsl,
}

impl Point {
    fn at_rest(initial: Vec3, color: Hsl) -> Self {
        Self {
            initial,
            current: initial,
            color,
        }
    }

    /// Position fixed at sphere-generation time.
    #[inline]
    pub fn initial(&self) -> Vec3 {
        self.initial
    }

    #[inline]
    pub fn current(&self) -> Vec3 {
        self.current
    }

    #[inline]
    pub fn color(&self) -> Hsl {
        self.color
    }
}

/// Per-instance data uploaded to the GPU: position plus premultiplied-free RGBA.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

/// The sphere of points. Length is fixed at construction.
pub struct ParticleField {
    points: Vec<Point>,
    mapper: SpectrumMapper,
    rest_color: Hsl,
    dirty: bool,
}

impl ParticleField {
    pub fn new(sampler: &SphereSampler, count: usize, radius: f32, mapper: SpectrumMapper) -> Self {
        let rest_color = Hsl::REST;
        let points = sampler
            .generate(count, radius)
            .into_iter()
            .map(|p| Point::at_rest(p, rest_color))
            .collect::<Vec<_>>();
        log::info!(
            "[field] {} points on radius {:.1} (spiral k={})",
            points.len(),
            radius,
            sampler.spiral_k
        );
        Self {
            points,
            mapper,
            rest_color,
            // First frame must upload the rest geometry.
            dirty: true,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Displace and recolour every point from `spectrum`, in place.
    pub fn update(&mut self, spectrum: &SpectrumSnapshot<'_>) {
        let mapper = &self.mapper;
        for (i, p) in self.points.iter_mut().enumerate() {
            let (factor, color) = mapper.map_index(i, spectrum);
            p.current = p.initial * factor;
            p.color = color;
        }
        self.dirty = true;
    }

    /// Return every point to its rest position and colour.
    pub fn rest(&mut self) {
        let rest_color = self.rest_color;
        for p in &mut self.points {
            p.current = p.initial;
            p.color = rest_color;
        }
        self.dirty = true;
    }

    /// Consume the "geometry changed" signal raised by `update`/`rest`.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Pack current positions and colours into `out`, reusing its allocation.
    pub fn write_instances(&self, out: &mut Vec<PointInstance>) {
        out.resize(self.points.len(), PointInstance::default());
        for (dst, p) in out.iter_mut().zip(&self.points) {
            let [r, g, b] = p.color.to_rgb();
            dst.position = p.current.to_array();
            dst.color = [r, g, b, 1.0];
        }
    }
}
