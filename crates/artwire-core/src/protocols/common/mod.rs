pub(crate) mod hex;
