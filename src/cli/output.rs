use micetro_findrange::{FindRangeResult, Result};
use serde_json::json;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Find Result
--------------------------------------------------------------------------------------*/

pub fn find_result(result: &FindRangeResult) -> Result<()> {
    println!("{}", serde_json::to_string(result)?);
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Lookup CIDRs
--------------------------------------------------------------------------------------*/

pub fn cidrs(cidrs: &[String]) {
    for cidr in cidrs {
        println!("{cidr}");
    }
}

/*--------------------------------------------------------------------------------------
  Ansible Module Result
--------------------------------------------------------------------------------------*/

pub fn module_result(result: &Result<FindRangeResult>) -> Result<()> {
    let output = match result {
        Ok(result) => serde_json::to_value(result)?,
        Err(error) => json!({
            "changed": false,
            "failed": true,
            "msg": error.to_string(),
        }),
    };
    println!("{output}");
    Ok(())
}
