pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod audit_log;
    }
}

pub mod modules {
    pub mod attendance {
        pub mod core {
            pub mod attendance_record;
            pub mod snapshot;
            pub mod student;
        }
        pub mod use_cases {
            pub mod track_attendance {
                pub mod command;
                pub mod store;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod export_attendance {
                pub mod download;
                pub mod errors;
                pub mod handler;
                pub mod rows;
                pub mod serialize;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_roster {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_audit_logs {
                pub mod handler;
                pub mod projection;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
                pub mod http_errors;
            }
            pub mod outbound {
                pub mod backing_store;
                pub mod backing_store_in_memory;
            }
        }
    }
}

pub mod shell;
