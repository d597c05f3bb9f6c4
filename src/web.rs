//! 网页图片批量下载模块
//!
//! # 设计思路
//!
//! 抓取网页，提取所有 `<img>` 的地址，按体积过滤后逐个交给
//! `ImageSaver::save_from_url` 落盘。单张失败只记日志，不中断整批。
//!
//! # 实现思路
//!
//! - `src` 优先，其次 `data-src`（懒加载图片）；相对地址按页面 URL 解析为绝对地址。
//! - 只保留带主机名的 http/https 地址，按出现顺序去重。
//! - `min_size > 0` 时发 HEAD 读取 `Content-Length`，明确小于阈值才丢弃；
//!   HEAD 失败或没有该头时保留。
//! - 两次下载之间随机等待一段时间，避免压垮对方服务器。

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use scraper::{Html, Selector};

use crate::error::AppError;
use crate::image_handler::{ImageConfig, ImageSaver, redact_url_for_log};

/// 一次批量下载的统计结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    /// 页面中提取并通过过滤的图片数量（截断前）。
    pub found: usize,
    /// 实际尝试下载的数量。
    pub attempted: usize,
    /// 成功保存的数量。
    pub saved: usize,
    pub output_dir: PathBuf,
}

/// 从 HTML 中提取图片绝对地址。
pub fn extract_image_urls(page_url: &reqwest::Url, html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("img") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for element in document.select(&selector) {
        let raw = element
            .value()
            .attr("src")
            .filter(|src| !src.trim().is_empty())
            .or_else(|| element.value().attr("data-src"));

        let Some(raw) = raw.map(str::trim).filter(|src| !src.is_empty()) else {
            continue;
        };

        let Ok(absolute) = page_url.join(raw) else {
            log::debug!("⏭️ 无法解析图片地址：{}", raw);
            continue;
        };

        if !matches!(absolute.scheme(), "http" | "https") || absolute.host_str().is_none() {
            continue;
        }

        let absolute = absolute.to_string();
        if seen.insert(absolute.clone()) {
            urls.push(absolute);
        }
    }

    urls
}

/// 按 `Content-Length` 过滤过小的图片。
pub async fn filter_by_min_size(saver: &ImageSaver, urls: Vec<String>, min_size: u64) -> Vec<String> {
    if min_size == 0 {
        return urls;
    }

    let mut kept = Vec::with_capacity(urls.len());
    for url in urls {
        match saver.probe_content_length(&url).await {
            Ok(Some(length)) if length < min_size => {
                log::debug!(
                    "⏭️ 图片过小（{} bytes < {}），跳过：{}",
                    length,
                    min_size,
                    redact_url_for_log(&url)
                );
            }
            Ok(_) => kept.push(url),
            Err(err) => {
                log::debug!("⚠️ HEAD 探测失败，保留：{} - {}", redact_url_for_log(&url), err);
                kept.push(url);
            }
        }
    }
    kept
}

/// 根据 URL 路径生成文件名；路径末段为空或不含扩展名时使用 `image_<序号>.jpg`。
pub fn file_name_for(url: &str, index: usize) -> String {
    let fallback = || format!("image_{}.jpg", index + 1);

    let Ok(parsed) = reqwest::Url::parse(url) else {
        return fallback();
    };

    let name = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    if name.is_empty() || !name.contains('.') || name.chars().all(|c| c == '.') {
        return fallback();
    }

    name.to_string()
}

/// 在 `[min_ms, max_ms]` 区间内取一个抖动延迟。
pub fn jittered_delay(min_ms: u64, max_ms: u64) -> Duration {
    if max_ms <= min_ms {
        return Duration::from_millis(min_ms);
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let span = max_ms - min_ms;
    Duration::from_millis(min_ms + seed % (span + 1))
}

/// 下载网页中的图片到 `output_dir`。
///
/// `max_images = 0` 表示不限制数量，`min_size = 0` 表示不按体积过滤。
pub async fn download_images(
    saver: &ImageSaver,
    page_url: &str,
    output_dir: &Path,
    max_images: usize,
    min_size: u64,
) -> Result<HarvestSummary, AppError> {
    let parsed = ImageSaver::parse_http_url(page_url)?;

    log::info!("🔎 正在提取图片地址：{}", redact_url_for_log(page_url));
    let html = saver.fetch_text(page_url).await?;
    let candidates = extract_image_urls(&parsed, &html);
    let mut image_urls = filter_by_min_size(saver, candidates, min_size).await;

    let found = image_urls.len();
    let mut summary = HarvestSummary {
        found,
        attempted: 0,
        saved: 0,
        output_dir: output_dir.to_path_buf(),
    };

    if image_urls.is_empty() {
        log::info!("📭 未找到图片");
        return Ok(summary);
    }
    log::info!("🖼️ 找到 {} 张图片", found);

    if max_images > 0 {
        image_urls.truncate(max_images);
    }

    let config: &ImageConfig = saver.config();
    let total = image_urls.len();
    let mut used_names = HashSet::new();

    for (index, url) in image_urls.iter().enumerate() {
        let mut name = file_name_for(url, index);
        if !used_names.insert(name.clone()) {
            name = format!("{}_{}", index + 1, name);
            used_names.insert(name.clone());
        }

        log::info!("⬇️ 下载 {}/{}：{}", index + 1, total, redact_url_for_log(url));
        summary.attempted += 1;
        if saver.save_from_url(url, output_dir.join(&name), true).await {
            summary.saved += 1;
        }

        if index + 1 < total {
            tokio::time::sleep(jittered_delay(
                config.request_delay_min_ms,
                config.request_delay_max_ms,
            ))
            .await;
        }
    }

    log::info!(
        "📁 批量下载完成 - 成功 {}/{}，目录：{}",
        summary.saved,
        summary.attempted,
        output_dir.display()
    );

    Ok(summary)
}
