pub mod crops;
