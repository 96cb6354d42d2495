//! Entity color generation.

use rand::Rng;

use slither_foundation::Rgb;

/// Generates a random shade of green for a snake segment.
///
/// Red stays low (0-50), green varies widely (100-255), blue stays low
/// (0-100), so every segment reads as green but no two look identical.
pub fn green_shade<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.gen_range(0..=50),
        rng.gen_range(100..=255),
        rng.gen_range(0..=100),
    )
}

/// Generates a random muted color for a food item.
pub fn food_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.gen_range(50..200),
        rng.gen_range(50..200),
        rng.gen_range(50..200),
    )
}
