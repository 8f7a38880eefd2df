use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::domain::model::{COLOUR_KEY, COLOUR_VALUE};
use crate::utils::error::{EtlError, Result};
use crate::utils::json::to_pretty_json;

/// 將固定的 colour 欄位寫進每一筆記錄的 Pipeline 實現。
pub struct ColourPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ColourPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ColourPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading input file: {}", self.config.input_file());
        let bytes = self.storage.read_file(self.config.input_file()).await?;
        // 整數僅支援到 i64/u64 範圍，超出範圍的整數解析時退化為 f64
        let json_data: serde_json::Value = serde_json::from_slice(&bytes)?;

        // 頂層必須是陣列
        let items = match json_data {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(EtlError::ProcessingError {
                    message: format!(
                        "top level of {} is {}, expected an array of objects",
                        self.config.input_file(),
                        json_kind(&other)
                    ),
                });
            }
        };

        // 任一元素不是物件就整批失敗，不寫任何檔案
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                serde_json::Value::Object(data) => records.push(Record { data }),
                other => {
                    return Err(EtlError::ProcessingError {
                        message: format!(
                            "element {} is {}, expected an object",
                            index,
                            json_kind(&other)
                        ),
                    });
                }
            }
        }

        tracing::debug!(
            "Parsed {} records from {}",
            records.len(),
            self.config.input_file()
        );
        Ok(records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let mut processed_records = Vec::with_capacity(data.len());
        let mut updated_count = 0;

        for mut record in data {
            // 既有的鍵保留原位置就地覆寫，新的鍵附加在尾端
            let previous = record.data.insert(
                COLOUR_KEY.to_string(),
                serde_json::Value::String(COLOUR_VALUE.to_string()),
            );
            if let Some(previous) = previous {
                tracing::debug!("Replaced existing '{}' value {}", COLOUR_KEY, previous);
            }

            updated_count += 1;
            processed_records.push(record);
        }

        Ok(TransformResult {
            processed_records,
            updated_count,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        // 序列化一次，兩個檔案寫入完全相同的位元組
        let json_data = to_pretty_json(&result.processed_records)?;

        tracing::debug!(
            "Writing {} bytes to {}",
            json_data.len(),
            self.config.input_file()
        );
        self.storage
            .write_file(self.config.input_file(), &json_data)
            .await?;
        println!(
            "Successfully added '{}': '{}' to {} objects",
            COLOUR_KEY, COLOUR_VALUE, result.updated_count
        );

        tracing::debug!("Writing backup copy to {}", self.config.backup_file());
        self.storage
            .write_file(self.config.backup_file(), &json_data)
            .await?;
        println!("Backup file '{}' created", self.config.backup_file());

        let output_path = format!("{}/{}", self.config.data_dir(), self.config.backup_file());
        Ok(output_path)
    }
}
