
#[cfg(test)]
mod sanitization;
