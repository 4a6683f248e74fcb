// Pure scalar potential functions. Every `*_derivative` returns dU/dx; callers
// negate to obtain the force coefficient. All distances must be strictly
// positive; the interaction managers reject degenerate geometry before calling.

#[inline]
pub fn harmonic_energy(x: f64, v0: f64, k_scaled: f64) -> f64 {
    let d = x - v0;
    0.5 * k_scaled * d * d
}

#[inline]
pub fn harmonic_derivative(x: f64, v0: f64, k_scaled: f64) -> f64 {
    k_scaled * (x - v0)
}

#[inline]
pub fn go_contact_energy(dist: f64, v0: f64, k_scaled: f64) -> f64 {
    let rho = v0 / dist;
    let rho2 = rho * rho;
    let rho10 = rho2.powi(5);
    let rho12 = rho10 * rho2;
    k_scaled * (5.0 * rho12 - 6.0 * rho10)
}

#[inline]
pub fn go_contact_derivative(dist: f64, v0: f64, k_scaled: f64) -> f64 {
    let rho = v0 / dist;
    let rho2 = rho * rho;
    let rho10 = rho2.powi(5);
    let rho12 = rho10 * rho2;
    60.0 * k_scaled / dist * (rho10 - rho12)
}

#[inline]
pub fn clementi_dihedral_energy(phi: f64, phi0: f64, k1_scaled: f64, k3_scaled: f64) -> f64 {
    let delta = phi - phi0;
    k1_scaled * (1.0 - delta.cos()) + k3_scaled * (1.0 - (3.0 * delta).cos())
}

#[inline]
pub fn clementi_dihedral_derivative(phi: f64, phi0: f64, k1_scaled: f64, k3_scaled: f64) -> f64 {
    let delta = phi - phi0;
    k1_scaled * delta.sin() + 3.0 * k3_scaled * (3.0 * delta).sin()
}

#[inline]
pub fn cosine_dihedral_energy(phi: f64, phi0: f64, half_nk: f64, n: f64) -> f64 {
    let s = (n * (phi - phi0)).sin();
    half_nk / n * s * s
}

// The sine argument is 2n, not n: the energy stores the halved 1 - cos(2n delta)
// form, so its derivative keeps the unhalved frequency.
#[inline]
pub fn cosine_dihedral_derivative(phi: f64, phi0: f64, half_nk: f64, double_n: f64) -> f64 {
    half_nk * (double_n * (phi - phi0)).sin()
}

#[inline]
pub fn lennard_jones_energy(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let rho = sigma / dist;
    let rho6 = rho.powi(6);
    let rho12 = rho6 * rho6;
    4.0 * epsilon * (rho12 - rho6)
}

#[inline]
pub fn lennard_jones_derivative(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let rho = sigma / dist;
    let rho6 = rho.powi(6);
    let rho12 = rho6 * rho6;
    24.0 * epsilon / dist * (rho6 - 2.0 * rho12)
}

#[inline]
pub fn excluded_volume_energy(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let rho = sigma / dist;
    epsilon * rho.powi(12)
}

#[inline]
pub fn excluded_volume_derivative(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let rho = sigma / dist;
    -12.0 * epsilon / dist * rho.powi(12)
}
