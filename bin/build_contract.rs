//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use reward_pool;

fn main() {
    // Compilation of RewardPool and PoolToken is driven by odra-build
}
