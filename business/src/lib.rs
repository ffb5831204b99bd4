pub mod application {
    pub mod cart_item {
        pub mod add;
        pub mod clear;
        pub mod count;
        pub mod get_all;
        pub mod remove;
        pub mod retire_product;
        pub mod update_quantity;

        #[cfg(test)]
        pub(crate) mod test_support;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod cart_item {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod add;
            pub mod clear;
            pub mod count;
            pub mod get_all;
            pub mod remove;
            pub mod retire_product;
            pub mod update_quantity;
        }
    }
    pub mod product {
        pub mod model;
        pub mod repository;
    }
    pub mod user {
        pub mod model;
        pub mod repository;
    }
}
