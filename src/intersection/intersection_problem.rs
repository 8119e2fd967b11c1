use argmin::core::{Jacobian, Operator};
use nalgebra::{DMatrix, DVector, Matrix3x4, Matrix4, Point3, Vector3, Vector4};

use crate::{
    misc::FloatingPoint,
    parametrisation::{IntersectionParametrisation, Periodicity},
    surface::ParametricSurface,
};

/// Residual & Jacobian provider for `F(u1, v1, u2, v2) = A(u1, v1) - B(u2, v2)`.
/// Three equations in four unknowns.
pub struct SurfaceIntersectionProblem<'a, T: FloatingPoint> {
    a: &'a dyn ParametricSurface<T>,
    b: &'a dyn ParametricSurface<T>,
}

impl<'a, T: FloatingPoint> SurfaceIntersectionProblem<'a, T> {
    pub fn new(a: &'a dyn ParametricSurface<T>, b: &'a dyn ParametricSurface<T>) -> Self {
        Self { a, b }
    }

    pub fn surface_a(&self) -> &'a dyn ParametricSurface<T> {
        self.a
    }

    pub fn surface_b(&self) -> &'a dyn ParametricSurface<T> {
        self.b
    }

    fn parametrisation(&self, x: &Vector4<T>) -> IntersectionParametrisation<T> {
        IntersectionParametrisation::new(
            self.a.parametrisation(x[0], x[1]),
            self.b.parametrisation(x[2], x[3]),
        )
    }

    pub fn periodicity(&self) -> (Periodicity, Periodicity) {
        (self.a.periodicity(), self.b.periodicity())
    }

    /// `A(u1, v1) - B(u2, v2)`
    pub fn residual(&self, x: &Vector4<T>) -> Vector3<T> {
        let p = self.parametrisation(x);
        self.a.evaluate(p.a()) - self.b.evaluate(p.b())
    }

    /// `[A_u, A_v, -B_u, -B_v]`
    pub fn joint_jacobian(&self, x: &Vector4<T>) -> Matrix3x4<T> {
        let p = self.parametrisation(x);
        let (au, av) = self.a.derivatives(p.a());
        let (bu, bv) = self.b.derivatives(p.b());
        Matrix3x4::from_columns(&[au, av, -bu, -bv])
    }
}

impl<T: FloatingPoint> Operator for SurfaceIntersectionProblem<'_, T> {
    type Param = Vector4<T>;
    type Output = DVector<T>;

    fn apply(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        Ok(DVector::from_column_slice(self.residual(param).as_slice()))
    }
}

impl<T: FloatingPoint> Jacobian for SurfaceIntersectionProblem<'_, T> {
    type Param = Vector4<T>;
    type Jacobian = DMatrix<T>;

    fn jacobian(&self, param: &Self::Param) -> Result<Self::Jacobian, anyhow::Error> {
        Ok(DMatrix::from_column_slice(
            3,
            4,
            self.joint_jacobian(param).as_slice(),
        ))
    }
}

/// The intersection system augmented with the tangent plane constraint
/// `G(u1, v1) = dot(A(u1, v1) - origin, tangent) - delta`, which makes it square.
pub struct MarchingProblem<'a, T: FloatingPoint> {
    intersection: SurfaceIntersectionProblem<'a, T>,
    /// A(current sample)
    origin: Point3<T>,
    /// unit tangent of the curve at the current sample
    tangent: Vector3<T>,
    /// signed distance to advance along the tangent
    delta: T,
}

impl<'a, T: FloatingPoint> MarchingProblem<'a, T> {
    pub fn new(
        intersection: SurfaceIntersectionProblem<'a, T>,
        origin: Point3<T>,
        tangent: Vector3<T>,
        delta: T,
    ) -> Self {
        Self {
            intersection,
            origin,
            tangent,
            delta,
        }
    }

    fn constraint(&self, x: &Vector4<T>) -> T {
        let a = self.intersection.surface_a();
        let p = a.evaluate(&a.parametrisation(x[0], x[1]));
        (p - self.origin).dot(&self.tangent) - self.delta
    }
}

impl<T: FloatingPoint> Operator for MarchingProblem<'_, T> {
    type Param = Vector4<T>;
    type Output = DVector<T>;

    fn apply(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let f = self.intersection.residual(param);
        Ok(DVector::from_column_slice(&[
            f.x,
            f.y,
            f.z,
            self.constraint(param),
        ]))
    }
}

impl<T: FloatingPoint> Jacobian for MarchingProblem<'_, T> {
    type Param = Vector4<T>;
    type Jacobian = DMatrix<T>;

    /// The constraint row is differentiated analytically: `[A_u . t, A_v . t, 0, 0]`.
    fn jacobian(&self, param: &Self::Param) -> Result<Self::Jacobian, anyhow::Error> {
        let j = self.intersection.joint_jacobian(param);
        let mut m = Matrix4::zeros();
        m.fixed_view_mut::<3, 4>(0, 0).copy_from(&j);
        m[(3, 0)] = j.column(0).dot(&self.tangent);
        m[(3, 1)] = j.column(1).dot(&self.tangent);
        Ok(DMatrix::from_column_slice(4, 4, m.as_slice()))
    }
}
