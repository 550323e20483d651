// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand.

    // s!() → String::new()
    () => {
        ::std::string::String::new()
    };
    // Anything `String::from` accepts: &str, char, Box<str>, …
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Concatenate two or more &str-like pieces into one String.
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}
