pub const PROMETHEUS_QUERY: &str = "/api/v1/query";

pub const PVOUTPUT_ADD_OUTPUT: &str = "/service/r2/addoutput.jsp";
pub const PVOUTPUT_ADD_STATUS: &str = "/service/r2/addstatus.jsp";
