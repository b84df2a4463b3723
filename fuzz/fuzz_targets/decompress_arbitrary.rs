#![no_main]
use libfuzzer_sys::fuzz_target;

use gzchunk::DriverConfig;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the whole session. Err results are expected;
    // what we verify is no panics and no output past the planned capacity.
    // The cap keeps an attacker-chosen trailer from allocating gigabytes.
    let cfg = DriverConfig::default().with_max_output_size(1 << 20);
    for chunk in [1usize, 7, 4096] {
        let cfg = cfg.with_chunk_size(chunk).unwrap();
        if let Ok(d) = gzchunk::decompress(data, &cfg) {
            let rep = d.report();
            assert!(rep.produced <= rep.capacity);
            assert_eq!(d.output().len(), rep.declared_length as usize);
        }
    }
});
