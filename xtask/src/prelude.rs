pub use anstream::println as aprintln;

/// Terminal palette used by xtask output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[38;2;247;118;142m";
    pub const GREEN: &str = "\x1b[38;2;158;206;106m";
    pub const YELLOW: &str = "\x1b[38;2;224;175;104m";
    pub const BLUE: &str = "\x1b[38;2;122;162;247m";
    pub const MAGENTA: &str = "\x1b[38;2;187;154;247m";
    pub const CYAN: &str = "\x1b[38;2;125;207;255m";
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

pub fn p_g(text: &str) -> String {
    paint(colors::GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(colors::RED, text)
}

pub fn p_y(text: &str) -> String {
    paint(colors::YELLOW, text)
}

pub fn p_b(text: &str) -> String {
    paint(colors::BLUE, text)
}

pub fn p_m(text: &str) -> String {
    paint(colors::MAGENTA, text)
}

pub fn p_c(text: &str) -> String {
    paint(colors::CYAN, text)
}
