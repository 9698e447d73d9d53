pub mod cbc_be;
