use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiResponseWithData<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

pub fn success_response(message: &str) -> ApiResponse {
    ApiResponse {
        success: true,
        message: message.to_string(),
    }
}

pub fn error_response(message: &str) -> ApiResponse {
    ApiResponse {
        success: false,
        message: message.to_string(),
    }
}

pub fn success_response_with_data<T>(message: &str, data: T) -> ApiResponseWithData<T> {
    ApiResponseWithData {
        success: true,
        message: Some(message.to_string()),
        data,
    }
}

/// Read endpoints reply with data only, no message line.
pub fn data_response<T>(data: T) -> ApiResponseWithData<T> {
    ApiResponseWithData {
        success: true,
        message: None,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_matches_envelope() {
        let body = serde_json::to_value(error_response("Invalid level")).unwrap();
        assert_eq!(body, json!({ "success": false, "message": "Invalid level" }));
    }

    #[test]
    fn data_response_omits_message() {
        let body = serde_json::to_value(data_response(json!({ "count": 0 }))).unwrap();
        assert_eq!(body, json!({ "success": true, "data": { "count": 0 } }));
    }

    #[test]
    fn success_with_data_keeps_message() {
        let body = serde_json::to_value(success_response_with_data("ok", 7)).unwrap();
        assert_eq!(body, json!({ "success": true, "message": "ok", "data": 7 }));
    }
}
