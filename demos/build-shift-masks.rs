//! # Build Shift Masks
//!
//! Prints the shift/mask table for one of the standard puncturing matrices as
//! Rust constants, ready to paste into an encoder.
//!
//! The first argument names the matrix (`rate_1_2`, `rate_2_3`, `rate_3_4`,
//! `rate_5_6`, `rate_7_8` or `rate_1_3`), the second is the word size in bits
//! and defaults to 32.
//!
//! Example usage:
//! ```
//! cargo run --example build-shift-masks -- rate_3_4 32 > /tmp/rate_3_4.rs
//! ```

use std::env;
use std::process;

use puncture_masks::{CodeConfig, StandardMatrix};

// Not used by the masks, only passed through.
const CONSTRAINT_LENGTH: usize = 7;

fn main() {
    let mut args = env::args().skip(1);
    let name = args.next().unwrap_or_else(|| String::from("rate_1_2"));
    let word_size = match args.next().map(|s| s.parse::<u32>()) {
        None => 32,
        Some(Ok(bits)) => bits,
        Some(Err(e)) => {
            eprintln!("invalid word size: {}", e);
            process::exit(2);
        }
    };

    let standard = match StandardMatrix::from_name(&name) {
        Some(standard) => standard,
        None => {
            eprintln!("unknown puncturing matrix {:?}", name);
            process::exit(2);
        }
    };

    let table = match CodeConfig::standard(word_size, CONSTRAINT_LENGTH, standard)
        .and_then(|config| config.derive())
    {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let prefix = name.to_uppercase();
    let polys = table.polynomials();

    println!("// {}, {} bit words, {} bits per word", name, word_size, table.bits_per_word());

    let offsets: Vec<String> = polys.iter().map(|p| p.offset().to_string()).collect();
    println!(
        "pub (crate) const {}_OFFSET: [u32; {}] = [{}];",
        prefix,
        polys.len(),
        offsets.join(", ")
    );

    let keep: Vec<String> = polys.iter().map(|p| format!("{:#x}", p.keep())).collect();
    println!(
        "pub (crate) const {}_KEEP: [u64; {}] = [{}];",
        prefix,
        polys.len(),
        keep.join(", ")
    );

    println!(
        "pub (crate) const {}_SHIFT_MASK: [&[(u32, u64)]; {}] = [",
        prefix,
        polys.len()
    );
    for poly in polys {
        let stages: Vec<String> = poly
            .stages()
            .iter()
            .map(|s| format!("({}, {:#x})", s.shift(), s.mask()))
            .collect();
        println!("    &[{}],", stages.join(", "));
    }
    println!("];");
}
