#![no_main]

use libfuzzer_sys::fuzz_target;
use stream::XdrReader;

fuzz_target!(|data: &[u8]| {
    let mut reader = XdrReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 6;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u32();
            }
            1 => {
                let _ = reader.read_i64();
            }
            2 => {
                let _ = reader.read_f64();
            }
            3 => {
                let len = usize::from(data[idx.saturating_sub(1)] % 32);
                let _ = reader.read_fixed_opaque(len);
            }
            4 => {
                let _ = reader.read_var_opaque(256);
            }
            _ => {
                let _ = reader.read_array::<16>();
            }
        }
    }
});
