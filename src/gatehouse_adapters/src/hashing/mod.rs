pub mod argon2_hasher;

pub use argon2_hasher::Argon2CredentialHasher;
