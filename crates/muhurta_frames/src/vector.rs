//! Plain `[f64; 3]` vector arithmetic.

pub type Vec3 = [f64; 3];

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(a: &Vec3, k: f64) -> Vec3 {
    [a[0] * k, a[1] * k, a[2] * k]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Unit vector along `a`; the zero vector maps to itself.
pub fn unit(a: &Vec3) -> Vec3 {
    let n = norm(a);
    if n == 0.0 { *a } else { scale(a, 1.0 / n) }
}
