//! ECIES: ephemeral-static Diffie-Hellman over secp256k1 with an
//! AES-128-CTR payload.
//!
//! The sender picks an ephemeral scalar `r`, transmits `R = r·G` next to
//! the ciphertext, and both sides reach the shared point `r·d·G`. SHA-256
//! over the big-endian X coordinate of that point is the whole key
//! derivation; the first sixteen digest bytes key the cipher.
//!
//! There is no authentication: counter mode is malleable, and a production
//! scheme would add a MAC over the ciphertext. Payloads are processed in
//! place, so the core allocates nothing.

use crate::aes::{Aes128, NONCE_SIZE};
use crate::arithmetic::affine::AffinePoint;
use crate::arithmetic::uint::Uint256;
use crate::sha256::Sha256;

/// Derives the public point `secret · G` for a secret scalar.
pub fn public_key(secret: &Uint256) -> AffinePoint {
    AffinePoint::GENERATOR * secret
}

/// Computes the shared point `secret · peer_public`.
///
/// Both sides arrive at the same point: r·(d·G) = d·(r·G). The result must
/// not be the point at infinity, which a zero scalar or a small-order
/// forgery would force and whose X coordinate is meaningless to the KDF.
/// Callers keep scalars in `[1, n)` and validate peer points.
pub fn diffie_hellman(secret: &Uint256, peer_public: &AffinePoint) -> AffinePoint {
    let shared = peer_public * secret;
    debug_assert!(!shared.is_identity());
    shared
}

/// The key derivation function: SHA-256 over the big-endian X coordinate
/// of the shared point.
pub fn derive_key(shared: &AffinePoint) -> [u8; 32] {
    Sha256::digest(&shared.x().to_be_bytes())
}

/// Builds the payload cipher from a shared point: AES-128 keyed by the
/// first half of the KDF output.
fn session_cipher(shared: &AffinePoint) -> Aes128 {
    let digest = derive_key(shared);
    Aes128::new(digest[..16].try_into().unwrap())
}

/// Encrypts `buf` in place for `recipient_public`, returning the ephemeral
/// public point `R` to transmit alongside the ciphertext.
///
/// The nonce must be unique per derived key; reusing one under the same
/// (ephemeral, recipient) pair reveals the XOR of the plaintexts.
pub fn encrypt_in_place(
    ephemeral_secret: &Uint256,
    recipient_public: &AffinePoint,
    nonce: &[u8; NONCE_SIZE],
    buf: &mut [u8],
) -> AffinePoint {
    let shared = diffie_hellman(ephemeral_secret, recipient_public);
    session_cipher(&shared).apply_ctr(nonce, buf);
    public_key(ephemeral_secret)
}

/// Decrypts in place what [`encrypt_in_place`] produced, given the
/// transmitted ephemeral point.
pub fn decrypt_in_place(
    recipient_secret: &Uint256,
    ephemeral_public: &AffinePoint,
    nonce: &[u8; NONCE_SIZE],
    buf: &mut [u8],
) {
    let shared = diffie_hellman(recipient_secret, ephemeral_public);
    session_cipher(&shared).apply_ctr(nonce, buf);
}

#[cfg(test)]
mod tests {
    use super::{decrypt_in_place, derive_key, diffie_hellman, encrypt_in_place, public_key};
    use crate::arithmetic::uint::Uint256;

    fn nonce() -> [u8; 12] {
        [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]
    }

    #[test]
    fn both_sides_derive_the_same_key() {
        let alice = Uint256::from_hex("a11ce");
        let bob = Uint256::from_hex("b0b");

        let shared_alice = diffie_hellman(&alice, &public_key(&bob));
        let shared_bob = diffie_hellman(&bob, &public_key(&alice));
        assert_eq!(shared_alice, shared_bob);
        assert_eq!(derive_key(&shared_alice), derive_key(&shared_bob));
    }

    #[test]
    fn round_trip() {
        let recipient = Uint256::from_hex("5eed");
        let ephemeral = Uint256::from_hex("e4e4e4");
        let recipient_pub = public_key(&recipient);

        let mut buf = *b"attack at dawn";
        let ephemeral_pub = encrypt_in_place(&ephemeral, &recipient_pub, &nonce(), &mut buf);
        assert_ne!(&buf, b"attack at dawn");

        decrypt_in_place(&recipient, &ephemeral_pub, &nonce(), &mut buf);
        assert_eq!(&buf, b"attack at dawn");
    }
}
