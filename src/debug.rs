macro_rules! print_word {
    ($msg:expr, $word:expr, $width:expr) => {{
        #[cfg(any(test, feature = "debug_masks"))]
        crate::debug::print_bits($msg, $word, $width);
        #[cfg(not(any(test, feature = "debug_masks")))]
        {
            // do nothing in release mode
            let _ = (&$msg, &$word, &$width);
        }
    }};
}

macro_rules! print_indices {
    ($msg:expr, $indices:expr) => {{
        #[cfg(any(test, feature = "debug_masks"))]
        crate::debug::print_list($msg, $indices);
        #[cfg(not(any(test, feature = "debug_masks")))]
        {
            // do nothing in release mode
            let _ = (&$msg, &$indices);
        }
    }};
}

/// Prints the low `width` bits of `word`, most significant first, in nibbles.
#[cfg(any(test, feature = "debug_masks"))]
pub(crate) fn print_bits(msg: &str, word: u64, width: u32) {
    let mut out = Vec::new();
    let mut i = width;

    while i > 0 {
        let take = if i % 4 == 0 { 4 } else { i % 4 };
        let nibble = (word >> (i - take)) & ((1 << take) - 1);
        out.push(format!("{:0w$b}", nibble, w = take as usize));
        i -= take;
    }

    println!("{:015}{}", msg, out.join(" "))
}

#[cfg(any(test, feature = "debug_masks"))]
pub(crate) fn print_list<T: std::fmt::Debug>(msg: &str, list: &[T]) {
    println!("{:015}{:?}", msg, list)
}
