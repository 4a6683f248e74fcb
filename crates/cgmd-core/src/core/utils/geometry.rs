use nalgebra::{Point3, Vector3};

/// Separations and squared norms below this threshold are treated as
/// degenerate geometry.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// Intermediate quantities of a bend-angle evaluation, shared between the
/// angle computation and the force distribution of the angle manager.
#[derive(Debug, Clone, Copy)]
pub struct BendGeometry {
    /// Angle at the vertex, in radians, in `[0, pi]`.
    pub theta: f64,
    pub cos_theta: f64,
    /// Vector from the vertex j to the outer particle i.
    pub arm_i: Vector3<f64>,
    /// Vector from the vertex j to the outer particle k.
    pub arm_k: Vector3<f64>,
}

/// Computes the angle at vertex `p_j` formed by `p_i` and `p_k`.
///
/// Returns `None` when either arm has (near-)zero length, i.e. when two of the
/// particles coincide and the angle is undefined.
pub fn bend_angle(p_i: &Point3<f64>, p_j: &Point3<f64>, p_k: &Point3<f64>) -> Option<BendGeometry> {
    let arm_i = p_i - p_j;
    let arm_k = p_k - p_j;
    let len_i = arm_i.norm();
    let len_k = arm_k.norm();
    if len_i < DISTANCE_EPSILON || len_k < DISTANCE_EPSILON {
        return None;
    }

    let cos_theta = (arm_i.dot(&arm_k) / (len_i * len_k)).clamp(-1.0, 1.0);
    Some(BendGeometry {
        theta: cos_theta.acos(),
        cos_theta,
        arm_i,
        arm_k,
    })
}

/// Intermediate quantities of a dihedral-angle evaluation. The plane normals
/// and bond vectors are exactly the ones the force distribution needs.
#[derive(Debug, Clone, Copy)]
pub struct DihedralGeometry {
    /// Signed dihedral angle, in radians, in `[-pi, pi]`.
    pub phi: f64,
    /// Normal of the (i, j, k) plane: `r_ji x r_jk`.
    pub m: Vector3<f64>,
    /// Normal of the (j, k, l) plane: `r_jk x r_lk`.
    pub n: Vector3<f64>,
    /// Central bond vector `p_k - p_j`.
    pub r_jk: Vector3<f64>,
    pub r_ji: Vector3<f64>,
    pub r_lk: Vector3<f64>,
}

/// Computes the signed dihedral angle of the chain `p_i - p_j - p_k - p_l`.
///
/// Returns `None` when the central bond has (near-)zero length or either
/// bonded triplet is collinear, leaving a plane normal of (near-)zero area; in
/// both cases the dihedral angle is undefined.
pub fn dihedral_angle(
    p_i: &Point3<f64>,
    p_j: &Point3<f64>,
    p_k: &Point3<f64>,
    p_l: &Point3<f64>,
) -> Option<DihedralGeometry> {
    let r_ji = p_i - p_j;
    let r_jk = p_k - p_j;
    let r_lk = p_l - p_k;

    let m = r_ji.cross(&r_jk);
    let n = r_jk.cross(&r_lk);
    let m_len = m.norm();
    let n_len = n.norm();
    if r_jk.norm() < DISTANCE_EPSILON || m_len < DISTANCE_EPSILON || n_len < DISTANCE_EPSILON {
        return None;
    }

    let cos_phi = (m.dot(&n) / (m_len * n_len)).clamp(-1.0, 1.0);
    let phi = r_ji.dot(&n).signum() * cos_phi.acos();
    Some(DihedralGeometry {
        phi,
        m,
        n,
        r_jk,
        r_ji,
        r_lk,
    })
}
