use crate::plane::Plane;
use crate::sample::Sample;
use crate::{BoundaryExtension, Error};

/// Ordered set of planes sharing one extent. Plane order is channel order:
/// a gray image has one plane, a color image has R, G, B.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image<T> {
    planes: Vec<Plane<T>>,
}

impl<T: Sample> Image<T> {
    pub fn new() -> Self {
        Self { planes: Vec::new() }
    }

    /// Allocates `num_components` zeroed planes of identical geometry.
    pub fn with_planes(num_components: usize, width: usize, height: usize, border: usize) -> Self {
        Self {
            planes: (0..num_components)
                .map(|_| Plane::new(width, height, border))
                .collect(),
        }
    }

    pub fn push(&mut self, plane: Plane<T>) -> Result<(), Error> {
        if let Some(first) = self.planes.first()
            && (first.width() != plane.width() || first.height() != plane.height())
        {
            return Err(Error::SizeMismatch {
                expected: (first.width(), first.height()),
                actual: (plane.width(), plane.height()),
            });
        }
        self.planes.push(plane);
        Ok(())
    }

    pub fn from_planes(planes: Vec<Plane<T>>) -> Result<Self, Error> {
        let mut img = Self::new();
        for p in planes {
            img.push(p)?;
        }
        Ok(img)
    }

    pub fn num_components(&self) -> usize {
        self.planes.len()
    }

    /// Extent shared by every plane, or `None` for an empty image.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.planes.first().map(|p| (p.width(), p.height()))
    }

    pub fn plane(&self, i: usize) -> Option<&Plane<T>> {
        self.planes.get(i)
    }

    pub fn plane_mut(&mut self, i: usize) -> Option<&mut Plane<T>> {
        self.planes.get_mut(i)
    }

    pub fn planes(&self) -> &[Plane<T>] {
        &self.planes
    }

    pub fn planes_mut(&mut self) -> &mut [Plane<T>] {
        &mut self.planes
    }

    pub fn into_planes(self) -> Vec<Plane<T>> {
        self.planes
    }

    pub fn extend_boundary(&mut self, policy: BoundaryExtension) {
        for p in &mut self.planes {
            p.extend_boundary(policy);
        }
    }

    /// Plane used as luminance by single-channel operators: the only plane of
    /// a gray image, the green plane of a color image.
    pub fn luma_plane(&self) -> Option<&Plane<T>> {
        match self.planes.len() {
            1 => self.planes.first(),
            3 => self.planes.get(1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Image, Plane};

    #[test]
    fn push_rejects_mismatched_extent() {
        let mut img = Image::new();
        img.push(Plane::<f32>::new(4, 3, 1)).expect("first plane");
        img.push(Plane::new(4, 3, 0)).expect("border may differ");

        let err = img.push(Plane::new(3, 3, 1)).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: (4, 3),
                actual: (3, 3)
            }
        );
        assert_eq!(img.num_components(), 2);
        assert_eq!(img.dimensions(), Some((4, 3)));
    }

    #[test]
    fn luma_plane_is_green_for_color() {
        let mut img = Image::with_planes(3, 2, 2, 0);
        img.plane_mut(1).expect("green").fill(7i32);
        assert_eq!(img.luma_plane().expect("luma").get(0, 0), 7);

        let gray = Image::<i32>::with_planes(1, 2, 2, 0);
        assert!(gray.luma_plane().is_some());
        assert!(Image::<i32>::with_planes(2, 2, 2, 0).luma_plane().is_none());
    }
}
