pub mod shared {
    pub mod core {
        pub mod clock;
        pub mod time;
    }
}

pub mod modules {
    pub mod tracking {
        pub mod errors;
        pub mod core {
            pub mod ports;
            pub mod project;
            pub mod time_entry;
            pub mod timer;
        }
        pub mod use_cases {
            pub mod manage_projects {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_time_entries {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod track_time {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod weekly_report {
                pub mod aggregation;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod render_invoice {
                pub mod handler;
                pub mod invoice;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod calendar_overview {
                pub mod handler;
                pub mod overview;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
            }
            pub mod outbound {
                pub mod json_file_store;
                pub mod store_in_memory;
            }
        }
    }
}

pub mod shell;
