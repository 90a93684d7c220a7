use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Seed a PRNG with `seed`, draw 4 bytes, and read them as a little-endian i32.
pub fn scramble(seed: i32) -> i32 {
    let mut seeder = make_rng(seed);
    let mut buf = [0u8; 4];
    seeder.fill_bytes(&mut buf);
    i32::from_le_bytes(buf)
}

/// Seed for the generator: one scramble away from the world seed.
pub fn generator_seed(world_seed: i32) -> i32 {
    scramble(world_seed)
}

/// Seed for the synchronization store: two scrambles away from the world
/// seed, so its stream never lines up with the generator's.
pub fn store_seed(world_seed: i32) -> i32 {
    scramble(scramble(world_seed))
}

pub fn make_rng(seed: i32) -> SmallRng {
    SmallRng::seed_from_u64(u64::from(seed as u32))
}
