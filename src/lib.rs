pub mod shared {
    pub mod infrastructure {
        pub mod webhook_store;
    }
}

pub mod modules {
    pub mod webhooks {
        pub mod core {
            pub mod bucket;
            pub mod events;
        }
        pub mod use_cases {
            pub mod receive_webhook {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
