//! Scripted ECIES round trip between Alice and Bob.
//!
//! Run with `cargo run --example ecies`.

use ecies256k1::ecies::{decrypt_in_place, encrypt_in_place, public_key};
use ecies256k1::Uint256;

fn main() {
    println!("=== ECIES over secp256k1, from scratch ===");

    // Bob's static key pair.
    let bob_secret = Uint256::from_hex(
        "B0B5ECA123456789B0B5ECA123456789B0B5ECA123456789B0B5ECA123456789",
    );
    let bob_public = public_key(&bob_secret);
    println!("[Setup] Bob's public key: {bob_public}");

    // Alice encrypts with a fresh ephemeral scalar. A real sender samples
    // it from a CSPRNG; the script pins it for reproducibility.
    let message = b"Hello Bob! This is ECIES from scratch.";
    println!(
        "\n[Alice] Message to send: {:?}",
        core::str::from_utf8(message).unwrap()
    );

    let alice_ephemeral = Uint256::from_hex(
        "A11CECA123456789A11CECA123456789A11CECA123456789A11CECA123456789",
    );
    let nonce = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

    let mut buf = message.to_vec();
    let ephemeral_public = encrypt_in_place(&alice_ephemeral, &bob_public, &nonce, &mut buf);
    println!("[Alice] Ephemeral point R: {ephemeral_public}");
    println!("[Alice] Ciphertext: {}", hex::encode(&buf));

    // Bob receives (R, ciphertext) and inverts the stream.
    println!("\n--- Transmitting (R, ciphertext) to Bob ---\n");
    decrypt_in_place(&bob_secret, &ephemeral_public, &nonce, &mut buf);
    println!(
        "[Bob] Decrypted message: {:?}",
        String::from_utf8(buf).unwrap()
    );
}
