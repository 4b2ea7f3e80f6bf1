/*!

  Utils for Signal Net development.

*/

/// Compare diagnostic dumps as strings up to indentation.
#[macro_export]
macro_rules! assert_dump_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                assert_eq!(
                    left_val.lines().count(),
                    right_val.lines().count(),
                    "dumps differ in length"
                );
                for (left_line, right_line) in left_val.lines().zip(right_val.lines()) {
                    assert_eq!(
                        left_line.trim(),
                        right_line.trim()
                    );
                }
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                assert_eq!(
                    left_val.lines().count(),
                    right_val.lines().count(),
                    std::format_args!($($arg)+)
                );
                for (left_line, right_line) in left_val.lines().zip(right_val.lines()) {
                    assert_eq!(
                        left_line.trim(),
                        right_line.trim(),
                        std::format_args!($($arg)+)
                    );
                }
            }
        }
    };
}

/// Drive a list of IN gates in order, then read back one gate. Stops at the first error.
/// Example: ```drive!(circuit, [a => true, b => false] => out)```
#[macro_export]
macro_rules! drive {
    ($circuit:expr, [$($gate:expr => $value:expr),* $(,)?] => $observed:expr) => {{
        let mut result = Ok(());
        $(
            if result.is_ok() {
                result = $circuit.set_input_state($gate, $value);
            }
        )*
        result.and_then(|_| $circuit.get_output_state($observed))
    }};
}
