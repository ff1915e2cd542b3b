pub fn absorbed(error: &dyn std::fmt::Display, clause: &str) -> String {
    format!("{error}; the comparison on `{clause}` is left without a right-hand side")
}

pub fn no_right_hand_side(clause: &str) -> String {
    format!("The comparison on `{clause}` has no datatype and no subquery to compare against.")
}

pub fn unsupported_value_shape(operator: &str) -> String {
    format!("The value given to `{operator}` does not have a supported shape.")
}

pub fn mismatched_value(datatype: &str, value: &dyn std::fmt::Display) -> String {
    format!("`{value}` is not a {datatype} value and is left out.")
}

pub fn unresolvable_typed_value() -> String {
    "A CASE value has neither a datatype nor a subquery.".to_string()
}

pub fn injection_detected(matched: &str) -> String {
    format!("Rejected statement containing `{matched}`.")
}
