//! Core traits for spreadcloud

use crate::point::*;
use crate::point_cloud::PointCloud;
use crate::spread::DEPTH_AXIS;

/// Spatial summaries of drawable geometry
pub trait Drawable {
    /// Get the axis-aligned bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);
    
    /// Get the center point of the bounding box
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }

    /// Minimum and maximum of the depth coordinate.
    ///
    /// Handy for choosing a spread pivot inside the data.
    fn depth_range(&self) -> (f32, f32) {
        let (min, max) = self.bounding_box();
        (min[DEPTH_AXIS], max[DEPTH_AXIS])
    }
}

impl<T> Drawable for PointCloud<T> 
where 
    T: Clone + Copy,
    Point3f: From<T>,
{
    fn bounding_box(&self) -> (Point3f, Point3f) {
        let mut points = self.points.iter().map(|p| Point3f::from(*p));
        let first = match points.next() {
            Some(first) => first,
            None => return (Point3f::origin(), Point3f::origin()),
        };

        points.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        })
    }
}
