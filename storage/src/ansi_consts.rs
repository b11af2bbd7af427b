pub const INFO: &str = "\x1B[38;5;4m\x1B[1m";

pub const END: &str = "\x1B[0m";

#[macro_export]
macro_rules! write_colored {
    ($to:expr, $color:expr, $str:expr, $($args:expr),* $(,)?) => {
        write!($to, "{}{}{}", $color, format_args!($str, $($args),*), $crate::ansi_consts::END)
    };
}

#[cfg(test)]
mod test {
    use std::fmt::Write;

    use super::*;

    #[test]
    fn test_write_colored() {
        let mut out = String::new();
        write_colored!(out, INFO, "bb{}", 3).unwrap();
        assert_eq!(out, format!("{INFO}bb3{END}"));
    }
}
