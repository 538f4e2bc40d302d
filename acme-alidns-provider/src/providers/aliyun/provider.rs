//! 阿里云 ChallengeGateway trait 实现

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::traits::{ChallengeGateway, ErrorContext};
use crate::types::{CreateTxtRecordRequest, RecordPage, TxtRecord, TxtRecordQuery};

use super::{
    AddDomainRecordResponse, AliyunProvider, DeleteDomainRecordResponse,
    DescribeDomainRecordsResponse, MAX_PAGE_SIZE, PROVIDER_NAME,
};

const TXT: &str = "TXT";

#[async_trait]
impl ChallengeGateway for AliyunProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn probe_zone(&self, zone: &str) -> Result<RecordPage> {
        #[derive(Serialize)]
        struct DescribeDomainRecordsRequest {
            #[serde(rename = "DomainName")]
            domain_name: String,
            #[serde(rename = "PageNumber")]
            page_number: u32,
            #[serde(rename = "PageSize")]
            page_size: u32,
        }

        let zone = normalize_domain_name(zone);
        let req = DescribeDomainRecordsRequest {
            domain_name: zone.clone(),
            page_number: 1,
            page_size: 1,
        };

        let response: DescribeDomainRecordsResponse = self
            .request("DescribeDomainRecords", &req, ErrorContext::domain(&zone))
            .await?;

        let total_count = response.total_count.unwrap_or(0);
        Ok(RecordPage {
            total_count,
            returned: response.into_records().len(),
        })
    }

    async fn create_txt_record(&self, req: &CreateTxtRecordRequest) -> Result<String> {
        #[derive(Serialize)]
        struct AddDomainRecordRequest<'a> {
            #[serde(rename = "DomainName")]
            domain_name: &'a str,
            #[serde(rename = "RR")]
            rr: &'a str,
            #[serde(rename = "Type")]
            record_type: &'a str,
            #[serde(rename = "Value")]
            value: &'a str,
            #[serde(rename = "TTL")]
            ttl: u32,
        }

        let zone = normalize_domain_name(&req.zone);
        let api_req = AddDomainRecordRequest {
            domain_name: &zone,
            rr: &req.rr,
            record_type: TXT,
            value: &req.value,
            ttl: req.ttl,
        };

        let response: AddDomainRecordResponse = self
            .request(
                "AddDomainRecord",
                &api_req,
                ErrorContext::record(&zone, &req.rr),
            )
            .await?;

        Ok(response.record_id)
    }

    async fn query_txt_records(&self, query: &TxtRecordQuery) -> Result<Vec<TxtRecord>> {
        #[derive(Serialize)]
        struct DescribeDomainRecordsRequest<'a> {
            #[serde(rename = "DomainName")]
            domain_name: &'a str,
            #[serde(rename = "PageNumber")]
            page_number: u32,
            #[serde(rename = "PageSize")]
            page_size: u32,
            /// 主机记录关键字（模糊搜索）
            #[serde(rename = "RRKeyWord")]
            rr_keyword: &'a str,
            #[serde(rename = "TypeKeyWord")]
            type_keyword: &'a str,
            #[serde(rename = "ValueKeyWord")]
            value_keyword: &'a str,
        }

        let zone = normalize_domain_name(&query.zone);
        let mut records = Vec::new();
        let mut fetched = 0_usize;

        // 关键字是模糊匹配，命中可能超过一页，逐页取完
        for page_number in 1_u32.. {
            let req = DescribeDomainRecordsRequest {
                domain_name: &zone,
                page_number,
                page_size: MAX_PAGE_SIZE,
                rr_keyword: &query.rr,
                type_keyword: TXT,
                value_keyword: &query.value,
            };

            let response: DescribeDomainRecordsResponse = self
                .request("DescribeDomainRecords", &req, ErrorContext::domain(&zone))
                .await?;

            let total_count = response.total_count.unwrap_or(0) as usize;
            let page = response.into_records();
            let returned = page.len();
            fetched += returned;

            records.extend(
                page.into_iter()
                    .filter(|r| r.record_type.eq_ignore_ascii_case(TXT))
                    .map(|r| TxtRecord {
                        record_id: r.record_id,
                        rr: r.rr,
                        value: r.value,
                        ttl: r.ttl,
                    }),
            );

            if returned < MAX_PAGE_SIZE as usize || fetched >= total_count {
                break;
            }
        }

        Ok(records)
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        #[derive(Serialize)]
        struct DeleteDomainRecordRequest<'a> {
            #[serde(rename = "RecordId")]
            record_id: &'a str,
        }

        let _response: DeleteDomainRecordResponse = self
            .request(
                "DeleteDomainRecord",
                &DeleteDomainRecordRequest { record_id },
                ErrorContext::record_id(record_id),
            )
            .await?;

        Ok(())
    }
}
