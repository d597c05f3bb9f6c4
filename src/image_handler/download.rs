//! # 网络下载模块
//!
//! ## 设计思路
//!
//! 统一处理与 HTTP 相关的读取：图片流式下载写盘、页面文本抓取、HEAD 体积探测。
//! 目标是尽快失败：状态码不是 2xx 时在创建文件之前就返回错误，不留下空文件。
//!
//! ## 实现思路
//!
//! - URL 仅接受 http/https，解析失败归为 `InvalidInput`。
//! - 文件包在容量为 `chunk_size`（默认 8 KiB）的 `BufWriter` 中，按块落盘。
//! - 需要先解码再保存的调用方使用 `fetch_bytes` 在内存中取回响应体，不触碰目标路径。
//! - 传输中途失败时删除已写入的半截文件。
//! - 日志中的 URL 去掉 query 与 fragment，避免泄露签名参数。
//! - 不做重试与重定向限制之外的策略，沿用 reqwest 默认行为。

use std::fs::File;
use std::io::{BufWriter, Write};

use super::source::{PayloadKind, SaveTarget, SavedImage};
use super::writer::sniff_mime;
use super::{ImageError, ImageSaver};

/// 签名识别只需要开头的少量字节。
const SNIFF_PREFIX_BYTES: usize = 64;

impl ImageSaver {
    /// 流式下载 URL 并写入目标路径。
    pub(super) async fn download_to_file(
        &self,
        url: &str,
        target: &SaveTarget,
    ) -> Result<SavedImage, ImageError> {
        log::info!("🌐 开始下载图片 - URL: {}", redact_url_for_log(url));
        let response = self.get_success(url).await?;

        let file = Self::create_target_file(target)?;
        let mut writer = BufWriter::with_capacity(self.config.chunk_size, file);
        let mut head = Vec::with_capacity(SNIFF_PREFIX_BYTES);

        let written = match self.copy_body(response, &mut writer, &mut head, url).await {
            Ok(written) => written,
            Err(err) => {
                drop(writer);
                Self::discard_partial(&target.path);
                return Err(err);
            }
        };

        log::debug!("✅ 下载完成 - {} bytes", written);

        Ok(SavedImage {
            path: target.path.clone(),
            bytes_written: written,
            mime_type: sniff_mime(&head),
            kind: PayloadKind::Url,
        })
    }

    /// 把响应体完整读入内存（不写盘）。
    pub(crate) async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        log::info!("🌐 开始下载图片 - URL: {}", redact_url_for_log(url));
        let response = self.get_success(url).await?;

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| self.map_reqwest_error(e, url))
    }

    /// 发送 GET；非 2xx 直接返回 `HttpStatus`。
    async fn get_success(&self, url: &str) -> Result<reqwest::Response, ImageError> {
        let parsed = Self::parse_http_url(url)?;

        let response = self
            .http_client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::HttpStatus {
                status: status.as_u16(),
                reason: status_message(status.as_u16()),
            });
        }
        Ok(response)
    }

    async fn copy_body(
        &self,
        mut response: reqwest::Response,
        writer: &mut BufWriter<File>,
        head: &mut Vec<u8>,
        url: &str,
    ) -> Result<u64, ImageError> {
        let mut total: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))?
        {
            if head.len() < SNIFF_PREFIX_BYTES {
                let take = (SNIFF_PREFIX_BYTES - head.len()).min(chunk.len());
                head.extend_from_slice(&chunk[..take]);
            }

            writer
                .write_all(&chunk)
                .map_err(|e| ImageError::FileSystem(format!("写入下载数据失败：{}", e)))?;
            total = total.saturating_add(chunk.len() as u64);
        }

        writer
            .flush()
            .map_err(|e| ImageError::FileSystem(format!("写入下载数据失败：{}", e)))?;

        Ok(total)
    }

    /// 抓取页面文本（用于网页图片提取）。
    pub(crate) async fn fetch_text(&self, url: &str) -> Result<String, ImageError> {
        let response = self.get_success(url).await?;

        response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))
    }

    /// 通过 HEAD 请求读取 `Content-Length`。
    ///
    /// 服务端未返回该头时得到 `Ok(None)`。
    pub(crate) async fn probe_content_length(&self, url: &str) -> Result<Option<u64>, ImageError> {
        let parsed = Self::parse_http_url(url)?;

        let response = self
            .http_client
            .head(parsed)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))?;

        Ok(response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok()))
    }

    pub(crate) fn parse_http_url(url: &str) -> Result<reqwest::Url, ImageError> {
        let parsed = reqwest::Url::parse(url.trim())
            .map_err(|e| ImageError::InvalidInput(format!("URL 格式错误：{}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ImageError::InvalidInput("仅支持 HTTP/HTTPS".to_string()));
        }
        if parsed.host_str().is_none() {
            return Err(ImageError::InvalidInput("URL 缺少主机地址".to_string()));
        }

        Ok(parsed)
    }

    /// 统一映射 reqwest 错误到业务错误。
    fn map_reqwest_error(&self, e: reqwest::Error, url: &str) -> ImageError {
        let err_msg = e.to_string().replace(url, &redact_url_for_log(url));

        if e.is_timeout() {
            ImageError::Network(format!("下载超时（{}秒）：{}", self.config.download_timeout, err_msg))
        } else if e.is_connect() {
            ImageError::Network(format!("无法连接：{}", err_msg))
        } else {
            ImageError::Network(format!("请求失败：{}", err_msg))
        }
    }
}

/// 常见 HTTP 状态码文案。
fn status_message(code: u16) -> &'static str {
    match code {
        404 => "未找到",
        403 => "访问被拒绝",
        401 => "需要认证",
        500..=599 => "服务器错误",
        _ => "请求失败",
    }
}

pub(crate) fn redact_url_for_log(url: &str) -> String {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return "<invalid-url>".to_string();
    };

    let host = parsed.host_str().unwrap_or("<unknown-host>");
    let port = parsed.port().map(|p| format!(":{}", p)).unwrap_or_default();

    format!("{}://{}{}{}", parsed.scheme(), host, port, parsed.path())
}
