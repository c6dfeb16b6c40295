//! Crop advisory generation.
//!
//! The relay enriches every reading with a five-field advisory before it is
//! pushed upstream. [`Advisor`] is the seam for a real inference backend;
//! [`StubAdvisor`] returns fixed text regardless of the reading.

use serde::Serialize;

use crate::telemetry::SensorReading;

/// Advisory fields attached to each reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub prediction: String,
    pub advice: String,
    pub advice_nutrition: String,
    pub advice_care: String,
    /// Free-form note ("ghi chú").
    pub ghi_chu: String,
}

/// Produces an advisory for a reading.
pub trait Advisor: Send + Sync {
    fn advise(&self, reading: &SensorReading) -> Advisory;
}

/// Deterministic placeholder advisor.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubAdvisor;

impl Advisor for StubAdvisor {
    fn advise(&self, _reading: &SensorReading) -> Advisory {
        Advisory {
            prediction: "Cây phát triển bình thường".to_string(),
            advice: "Duy trì tưới nước đều đặn vào sáng sớm và chiều mát".to_string(),
            advice_nutrition: "Bón phân hữu cơ hoai mục 7-10 ngày một lần".to_string(),
            advice_care: "Kiểm tra sâu bệnh ở mặt dưới lá mỗi tuần".to_string(),
            ghi_chu: "Dữ liệu mô phỏng, chưa dùng mô hình AI".to_string(),
        }
    }
}
