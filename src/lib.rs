//! chained-hashmap: a string-to-string map built from first principles
//! with separate chaining and prime-sequence growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a worked, tested rendition of the textbook chaining design,
//!   small enough that every invariant can be checked directly.
//! - Layers:
//!   - primes: the fixed ascending table of prime capacities and the
//!     cursor helpers that walk it.
//!   - ChainedHashMap: the bucket array (one `Vec` chain per bucket), the
//!     entry record, put/get/remove/contains_key, and the load-factor
//!     driven growth that rehashes into the next prime capacity.
//!
//! Constraints
//! - Single-threaded: plain owned value, no interior mutability, no
//!   atomics. Callers wanting cross-thread use must serialize externally;
//!   growth rewrites the whole bucket array and cannot interleave with
//!   anything.
//! - Keys and values are both `String`. The hasher is the only type
//!   parameter, so tests can force worst-case collisions.
//! - Ownership is tree-shaped: the map owns its buckets, each bucket owns
//!   its entries; entries are never shared between buckets.
//!
//! Growth semantics
//! - Capacity is always a value from the prime table, starting at 769.
//! - Every `put` first checks `len / capacity > 0.65` on the pre-insert
//!   count, before locating a bucket and before knowing whether the key is
//!   new; crossing the threshold grows to the next prime and rehashes.
//! - The final prime is a ceiling: growth stops there and the load factor
//!   may exceed the threshold from then on. Availability is preferred over
//!   strict load-factor enforcement.
//! - Removal never shrinks the table.
//!
//! Hashing invariants
//! - Each entry stores its `u64` hash, computed once at insertion;
//!   indexing always uses the stored hash, so growth never re-hashes key
//!   text.
//! - Bucket selection is `hash % capacity` in unsigned 64-bit arithmetic;
//!   the index is in range for every possible hash value.
//!
//! Error model
//! - None. Absence of a key is `Option::None` on `get`/`remove`, never an
//!   error; capacity exhaustion silently stops growth.
//!
//! Non-goals
//! - No iteration/enumeration API.
//! - No generic key/value types.
//! - No persistence, no concurrency support, no pluggable hash policy
//!   beyond the test-facing hasher parameter.

mod chained_map;
mod chained_map_proptest;
mod primes;

// Public surface
pub use chained_map::ChainedHashMap;
