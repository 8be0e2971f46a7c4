//! Global allocator for the `cipherkit` binary.
//!
//! Every operation allocates a handful of short-lived buffers (padded
//! plaintext, ciphertext, base64 text), so the binary swaps the system
//! allocator for mimalloc. The library itself does not set an allocator.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
